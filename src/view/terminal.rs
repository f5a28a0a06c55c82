//! Terminal rendering of a page snapshot
//!
//! Prints the readouts, the tag controls, the top zone and every category the
//! way a visitor would see them after the recorded operations: collapsed
//! sections show only their heading and hidden entries are left out.

use std::fmt::Write;

use colored::Colorize;

use super::RecordingView;
use crate::model::{Item, ListOwner, Page};
use crate::nav::ScrollTarget;

/// Render `page` as seen through `view`
#[must_use]
pub fn render(page: &Page, view: &RecordingView) -> String {
    let mut out = String::new();

    if let Some(status) = &view.status {
        let _ = writeln!(out, "{}", status.bold());
    }
    if let Some(tags) = &view.active_tags {
        let _ = writeln!(out, "{}", tags.cyan());
    }
    if let Some(hint) = &view.hint {
        let _ = writeln!(out, "{}", hint.yellow());
    }
    if let Some(pref) = view.sort_controls {
        let _ = writeln!(out, "{} {pref}", "sort:".dimmed());
    }
    if !page.tags.is_empty() {
        let _ = writeln!(out, "{} {}", "tags:".dimmed(), tag_controls(page, view));
    }

    for (index, fold) in page.folds.iter().enumerate() {
        let marker = if fold.state.is_expanded() { "v" } else { ">" };
        let _ = writeln!(out, "{marker} {}", fold.title.bold());
        if fold.state.is_expanded() {
            write_lists(&mut out, page, ListOwner::TopZone(index));
        }
    }

    for (index, category) in page.categories.iter().enumerate() {
        let active = view.toc_active.as_deref() == Some(category.id.as_str());
        let heading = format!("== {} ==", category.name);
        let heading = if active { heading.green().bold() } else { heading.bold() };
        if category.collapsed {
            let _ = writeln!(out, "{heading} {}", "(collapsed)".dimmed());
        } else {
            let _ = writeln!(out, "{heading}");
            write_lists(&mut out, page, ListOwner::Category(index));
        }
    }

    if let Some(request) = view.scrolls.last() {
        let target = match &request.target {
            ScrollTarget::Item(id) => page.item(*id).title.clone(),
            ScrollTarget::Category(id) => format!("#cat-{id}"),
        };
        let _ = writeln!(out, "{} {target}", "scrolled to".dimmed());
    }

    out
}

/// The page's tag selectors, selected ones in brackets
fn tag_controls(page: &Page, view: &RecordingView) -> String {
    page.tags
        .iter()
        .map(|tag| {
            if view.active_tag_controls.contains(tag) {
                format!("[{tag}]").cyan().bold().to_string()
            } else {
                tag.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_lists(out: &mut String, page: &Page, owner: ListOwner) {
    for list in page.lists.iter().filter(|list| list.owner == owner) {
        for id in &list.items {
            let item = page.item(*id);
            if item.visible {
                let _ = writeln!(out, "  {}", format_item(item));
            }
        }
    }
}

/// One entry line: title, date, importance and tags
#[must_use]
pub fn format_item(item: &Item) -> String {
    let mut line = item.title.clone();
    if !item.date.is_empty() {
        let _ = write!(line, "  {}", item.date.dimmed());
    }
    if !item.importance.is_empty() {
        let _ = write!(line, "  imp {}", item.importance);
    }
    if !item.tags.is_empty() {
        let _ = write!(line, "  [{}]", item.tags.join(", ").blue());
    }
    if item.detail_open {
        let _ = write!(line, "\n    {}", item.summary.italic());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FoldState;
    use crate::testing::sample_page;

    #[test]
    fn test_render_hides_collapsed_and_filtered() {
        colored::control::set_override(false);
        let mut page = sample_page();
        page.categories[1].collapsed = true;
        page.folds[1].state = FoldState::Collapsed;
        let hidden = page.find_item("43").unwrap();
        page.item_mut(hidden).visible = false;

        let mut view = RecordingView::new();
        view.status = Some("query \"rust\": 1 / 8 hits".into());
        view.toc_active = Some("lang".into());

        let text = render(&page, &view);
        assert!(text.starts_with("query \"rust\": 1 / 8 hits\n"));
        assert!(text.contains("v Top picks\n"));
        assert!(text.contains("> Market\n"));
        assert!(!text.contains("GPU prices"));
        assert!(text.contains("Borrow checker deep dive"));
        assert!(!text.contains("Async runtimes compared"));
        assert!(text.contains("== Infrastructure == (collapsed)"));
        assert!(!text.contains("Kubernetes operators"));
    }

    #[test]
    fn test_render_marks_selected_tag_controls() {
        colored::control::set_override(false);
        let page = sample_page();
        let mut view = RecordingView::new();
        view.active_tag_controls.insert("async".into());
        view.active_tag_controls.insert("rust".into());

        let text = render(&page, &view);
        assert!(text.starts_with(
            "tags: [rust] compiler [async] zig k8s go linux news release hardware\n"
        ));

        let bare = Page { tags: Vec::new(), ..sample_page() };
        assert!(!render(&bare, &view).contains("tags:"));
    }

    #[test]
    fn test_format_item_with_open_detail() {
        colored::control::set_override(false);
        let mut page = sample_page();
        let id = page.find_item("42").unwrap();
        page.item_mut(id).detail_open = true;

        let line = format_item(page.item(id));
        assert_eq!(
            line,
            "Borrow checker deep dive  2026-10-10  imp 3  [rust, compiler]\n    \
             Lifetimes and ownership explained"
        );
    }
}
