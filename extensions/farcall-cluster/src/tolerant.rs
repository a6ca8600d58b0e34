mod fail_back_strategy;
mod fail_fast_strategy;
mod fail_over_strategy;
mod fail_silent_strategy;
pub mod tolerance_strategy_factory;
mod tolerance_strategy_interface;

pub use fail_back_strategy::FailBackStrategy;
pub use fail_fast_strategy::FailFastStrategy;
pub use fail_over_strategy::FailOverStrategy;
pub use fail_silent_strategy::FailSilentStrategy;
pub use tolerance_strategy_interface::{ToleranceContext, ToleranceStrategy};
