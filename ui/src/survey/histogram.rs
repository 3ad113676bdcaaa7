use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::{debug, error};
use dioxus::prelude::*;

use crate::core::chart::{redraw, ChartConfig, ChartSurface};
use crate::core::dataset::QuestionDataset;
use crate::core::format::format_px;
use crate::core::rules::DisplayRules;
use crate::t;

/// Count-bar chart of one question.
///
/// Owns the question's current limit. Activating the tail bar raises it by
/// the question's expansion step, which re-runs grouping and an update pass
/// on the retained chart surface.
#[component]
pub fn HistogramChart(question: String, dataset: QuestionDataset, total: u32) -> Element {
    let rules = try_use_context::<DisplayRules>().unwrap_or_default();
    let config = try_use_context::<ChartConfig>().unwrap_or_default();
    let limit = use_signal(|| Option::<i64>::None);
    let surface = use_hook(|| {
        let config = config.with_synthetic_labels(t!("bar-tail"), t!("bar-empty"));
        Rc::new(RefCell::new(ChartSurface::new(config)))
    });

    let base_limit = dataset.limit;
    let expand_key = question.clone();
    let on_expand_tail = move || {
        let mut limit = limit;
        let next = rules.expanded_limit(&expand_key, limit(), base_limit);
        debug!(question = %expand_key, limit = next, "expanding tail");
        limit.set(Some(next));
    };

    let current_limit = limit();
    let pass = redraw(
        &mut surface.borrow_mut(),
        &dataset,
        current_limit,
        total,
        on_expand_tail,
    );

    match pass {
        Ok(report) => debug!(
            question = %question,
            mode = ?report.mode,
            limit = ?current_limit,
            created = report.created.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            "chart render pass"
        ),
        Err(err) => {
            error!(question = %question, "grouping failed: {err}");
            return rsx! {
                p { class: "chart-error", {t!("chart-error", error = err.to_string())} }
            };
        }
    }

    let (frame, nodes) = {
        let surface = surface.borrow();
        (surface.frame().cloned(), surface.items().to_vec())
    };
    let Some(frame) = frame else {
        return rsx! {};
    };

    let tail_hint = t!("chart-tail-hint");

    rsx! {
        svg {
            class: "{frame.class}",
            width: "{format_px(frame.width)}",
            height: "{format_px(frame.height)}",
            g { transform: "{frame.transform}",
                // Keyed by bar name so a surviving bar keeps its node when its rank moves.
                for node in nodes.into_iter() {
                    g {
                        key: "{node.key}",
                        class: "{node.class}",
                        transform: "{node.transform}",
                        "role": node.is_interactive().then_some("button"),
                        "aria-label": node.is_interactive().then(|| tail_hint.clone()),
                        onclick: {
                            let handle = node.clone();
                            move |_| {
                                handle.activate();
                            }
                        },
                        rect {
                            width: "{format_px(node.bar_width)}",
                            height: "{format_px(node.bar_height)}",
                        }
                        text {
                            class: "number",
                            x: "{format_px(node.count_x)}",
                            "dy": "{format_px(node.text_dy)}",
                            "{node.count_text}"
                        }
                        text {
                            class: "percent-number",
                            x: "{format_px(node.percent_x)}",
                            "dy": "{format_px(node.text_dy)}",
                            "{node.percent_text}"
                        }
                        text {
                            class: "label",
                            x: "{format_px(node.label_x)}",
                            "dy": "{format_px(node.text_dy)}",
                            "{node.label}"
                        }
                    }
                }
            }
        }
    }
}
