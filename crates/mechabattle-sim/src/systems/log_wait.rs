//! Log wait: holds the battle while queued log lines are revealed.
//!
//! Lines are shown one at a time. Each acknowledgement (or each tick in
//! auto-advance mode) replaces the shown line with the next pending one.
//! When both are empty the battle returns to idle.

use mechabattle_core::enums::BattlePhase;

use crate::context::BattleContext;

pub fn run(ctx: &mut BattleContext, auto_advance: bool, tick: u64) {
    match ctx.phase {
        BattlePhase::Idle if !ctx.pending_log.is_empty() => {
            ctx.begin_log_wait(tick);
        }
        BattlePhase::LogWait => {
            // The line revealed on entry stays up for at least one tick.
            if auto_advance && tick > ctx.phase_start_tick {
                ctx.advance_log();
            }
            finish_if_drained(ctx, tick);
        }
        _ => {}
    }
}

/// Player acknowledgement of the shown line.
pub fn acknowledge(ctx: &mut BattleContext, tick: u64) {
    if ctx.phase != BattlePhase::LogWait {
        return;
    }
    ctx.advance_log();
    finish_if_drained(ctx, tick);
}

fn finish_if_drained(ctx: &mut BattleContext, tick: u64) {
    if ctx.battle_log.is_empty() && ctx.pending_log.is_empty() {
        ctx.set_phase(BattlePhase::Idle, tick);
    }
}
