//! State-changing procedures. Each one checks whether the change can happen,
//! mutates the battle state, emits the matching messages and dispatches the
//! hooks that react to it. Requests queued by effects are routed here too.

pub mod ability_change;
pub mod catch;
pub mod damage;
pub mod field;
pub mod flee;
pub mod item_change;
pub mod stat_change;
pub mod status;
pub mod switch;
