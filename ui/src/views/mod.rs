mod home;
pub use home::Home;

mod result;
pub use result::MoodResult;
