mod artifact;
mod epoch;
mod growth;
mod meal_record;
mod trend;
mod window;

pub use artifact::Artifact;
pub use epoch::{Epoch, EpochCreation, EpochRotation};
pub use growth::GrowthStage;
pub use meal_record::{MealRecord, NewMealRecord};
pub use trend::{
    FrequencyEntry, FrequencyTrend, TrendAnalysis, TrendSignals, TrendStrategy, TrendStrength,
};
pub use window::RecordWindow;
