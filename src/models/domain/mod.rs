pub mod category;
pub mod drink;
pub mod question;
pub use category::Category;
pub use drink::{Drink, RecipePart};
pub use question::{Question, QuestionDraft};
