mod bracket_schedule;
mod calculation;
mod tax_bracket;
mod tax_regime;
mod taxpayer_category;

pub use bracket_schedule::{Band, BracketSchedule, ScheduleError};
pub use calculation::{CalculationInput, CalculationRequest, CalculationResult};
pub use tax_bracket::TaxBracket;
pub use tax_regime::TaxRegime;
pub use taxpayer_category::TaxpayerCategory;
