use shared::{CalendarCell, Severity};

pub const CARD: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md p-6 max-w-xl mx-auto mt-16";
pub const ALERT_CARD: &str = "p-4 rounded-lg shadow-md mt-4";

pub const INPUT_BASE: &str = "appearance-none border border-gray-600 bg-gray-800 text-white text-lg rounded-md w-full py-2 px-4 focus:outline-none focus:border-blue-500";
pub const INPUT_GROUP: &str = "flex-1 flex flex-col gap-2";

pub const BUTTON_BASE: &str = "px-5 py-2 rounded-lg font-medium text-white transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_PRIMARY: &str = "bg-blue-600 hover:bg-blue-700 focus:ring-2 focus:ring-blue-400 focus:outline-none";
pub const BUTTON_SECONDARY: &str = "bg-gray-600 hover:bg-gray-700 focus:ring-2 focus:ring-gray-400 focus:outline-none";
pub const BUTTON_FULL: &str = "w-full py-3 px-5 font-semibold rounded-lg transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed mt-8";
pub const BUTTON_NAV: &str = "w-10 h-10 rounded-full text-gray-200 hover:bg-gray-700 focus:outline-none";

pub const TEXT_LABEL: &str = "block text-sm font-semibold text-gray-200";
pub const TEXT_MUTED: &str = "text-sm text-gray-400";
pub const HEADING_LG: &str = "text-3xl font-extrabold mb-4 text-center text-gray-100";
pub const HEADING_SM: &str = "text-xl font-semibold text-gray-100";

pub const FLEX_BETWEEN: &str = "flex justify-between items-center";
pub const GRID_WEEK: &str = "grid grid-cols-7 gap-1";
pub const SPACE_Y_BASE: &str = "space-y-3";
pub const SPACE_Y_LG: &str = "space-y-6";

pub const DATE_TAG: &str = "inline-flex items-center gap-2 bg-blue-900 border border-blue-700 text-blue-100 rounded-full px-3 py-1 mr-2 mb-2";

pub const BG_PAGE: &str = "bg-gray-900 min-h-screen";

const CELL_BASE: &str = "h-10 rounded-md flex items-center justify-center text-sm select-none";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn button_primary(full_width: bool) -> String {
    if full_width {
        combine_classes(BUTTON_BASE, &combine_classes(BUTTON_PRIMARY, BUTTON_FULL))
    } else {
        combine_classes(BUTTON_BASE, BUTTON_PRIMARY)
    }
}

pub fn message_style(severity: Severity) -> String {
    match severity {
        Severity::Error => combine_classes(ALERT_CARD, "bg-red-500 text-white shadow-lg"),
        Severity::Success => combine_classes(ALERT_CARD, "bg-green-500 text-white shadow-lg"),
        Severity::Info => combine_classes(ALERT_CARD, "bg-blue-500 text-white shadow-lg"),
    }
}

pub fn cell_style(cell: &CalendarCell) -> String {
    let state = if cell.other_month {
        "text-gray-600"
    } else if cell.is_past {
        "text-gray-500 line-through cursor-not-allowed"
    } else if cell.is_selected {
        "bg-blue-600 text-white font-semibold cursor-pointer"
    } else {
        "text-gray-200 hover:bg-gray-700 cursor-pointer"
    };
    let today = if cell.is_today { "ring-2 ring-yellow-400" } else { "" };
    format!("{} {} {}", CELL_BASE, state, today)
}
