pub mod currency;
pub mod liga;
pub mod matching;
pub mod report;
pub mod tcgplayer;

pub use currency::*;
pub use liga::*;
pub use matching::*;
pub use report::*;
pub use tcgplayer::*;
