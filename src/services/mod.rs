pub mod category_service;
pub mod drink_service;
pub mod question_service;
pub mod quiz_picker;
