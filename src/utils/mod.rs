pub mod letters;
pub mod premium;
