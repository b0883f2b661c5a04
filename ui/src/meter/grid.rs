use dioxus::prelude::*;

use crate::core::emotions::Quadrant;
use crate::core::tally::{EmotionGrid, GridCell};
use crate::t;

#[component]
pub fn MoodGrid(grid: EmotionGrid, session_label: String) -> Element {
    let cells = grid.cells();
    let unrecognized = grid.unrecognized_entries();
    let total = grid.total_entries();
    let grid_label = t!("meter-grid-label", session = session_label.as_str());

    rsx! {
        div { class: "mood-meter__board",
            div {
                class: "mood-grid",
                role: "grid",
                aria_label: "{grid_label}",
                for cell in cells.into_iter() {
                    {render_cell(cell)}
                }
            }

            p { class: "mood-meter__count", {t!("meter-entry-count", count = total)} }

            ul { class: "mood-meter__legend",
                for quadrant in Quadrant::ALL {
                    li { class: "mood-meter__legend-item",
                        span {
                            class: "mood-meter__legend-swatch {quadrant.css_modifier()}",
                            style: "background-color: {quadrant.rgba(1.0)};",
                        }
                        span { {legend_label(quadrant)} }
                    }
                }
            }

            if unrecognized > 0 {
                p { class: "mood-meter__footnote",
                    {t!("meter-unrecognized", count = unrecognized)}
                }
            }
        }
    }
}

fn render_cell(cell: GridCell) -> Element {
    let background = cell.background();
    let modifier = cell.quadrant.css_modifier();
    let title = format!("{}: {}", cell.label, cell.frequency);

    rsx! {
        div {
            key: "{cell.index}",
            class: "mood-grid__cell {modifier}",
            role: "gridcell",
            title: "{title}",
            aria_label: "{title}",
            style: "background-color: {background};",
        }
    }
}

fn legend_label(quadrant: Quadrant) -> String {
    match quadrant {
        Quadrant::Red => t!("meter-legend-red"),
        Quadrant::Yellow => t!("meter-legend-yellow"),
        Quadrant::Blue => t!("meter-legend-blue"),
        Quadrant::Green => t!("meter-legend-green"),
        Quadrant::Unmapped => String::new(),
    }
}
