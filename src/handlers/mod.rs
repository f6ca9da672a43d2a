pub mod widget_handler;

pub use widget_handler::{
    configure, create_multiple_choice_widget, create_sorting_widget, get_parameter_schema,
    get_widget, health_check, move_item, select_option, submit_widget, update_sorting_params,
};
