//! Small utilities that sit next to the planner: a timer, a calculator and a
//! currency converter.

pub mod calculator;
pub mod currency;
pub mod timer;

pub use calculator::{CalcError, Calculator, Key, Operator};
pub use currency::{CURRENCIES, Conversion, CurrencyError, RateTable};
pub use timer::{Timer, TimerError, TimerHandle, TimerMode, TimerState, format_clock};
