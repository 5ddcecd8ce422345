pub mod prompts;
pub mod render;
pub mod shopping_list;

pub use prompts::{
    find_exact, fuzzy_matches, prompt_household, prompt_yes_no, resolve_recommended_item,
};
pub use render::{
    display_alerts, display_categories, display_category_report, display_category_summary,
    display_household, display_import_summary, display_inventory, display_kits,
};
pub use shopping_list::{shopping_list_rows, write_shopping_list, ShoppingListRow};
