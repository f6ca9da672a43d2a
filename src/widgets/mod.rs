pub mod multiple_choice;
pub mod sorting;

pub use multiple_choice::MultipleChoiceExercise;
pub use sorting::{ExerciseEvent, SortingExercise};
