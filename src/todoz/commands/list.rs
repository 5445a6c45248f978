use crate::commands::CmdResult;
use crate::index::index_todos;
use crate::model::FilterType;
use crate::views::Views;

/// Lists one view, numbered for display.
pub fn run(views: &Views, filter: FilterType) -> CmdResult {
    let listed = index_todos(views.get(filter).to_vec());
    CmdResult::default().with_listed_todos(listed)
}
