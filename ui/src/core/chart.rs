//! Horizontal count-bar chart: layout and the render/update protocol.
//!
//! A `ChartSurface` is the retained visual tree of one question's chart. The
//! first render mounts the root (fixed width and horizontal scale); later
//! renders only resize its height and reconcile the bar nodes by bar name,
//! so a bar that survives a re-render keeps its node.

use std::fmt;
use std::rc::Rc;

use super::dataset::QuestionDataset;
use super::error::GroupError;
use super::format::{format_count, format_percent, translate};
use super::grouping::{group, BarId, GroupedBar, Special};
use super::reconcile::{diff_keyed, Patch};
use super::scale::LinearScale;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Outer width of the chart, labels column included.
    pub width: f64,
    /// Vertical slot of one bar.
    pub item_height: f64,
    /// Gap above and below a bar inside its slot.
    pub item_margin: f64,
    pub margin: Margins,
    /// Bars this long or shorter get no percentage label.
    pub min_percent_width: f64,
    /// Horizontal offset of the value label, left of the bar origin.
    pub label_x: f64,
    /// Distance between the bar end and the count / percentage labels.
    pub value_offset: f64,
    pub tail_label: String,
    pub empty_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 860.0,
            item_height: 20.0,
            item_margin: 2.0,
            margin: Margins {
                top: 10.0,
                bottom: 0.0,
                left: 360.0,
                right: 20.0,
            },
            min_percent_width: 20.0,
            label_x: -3.0,
            value_offset: 3.0,
            tail_label: "Прочее".into(),
            empty_label: "Не указано".into(),
        }
    }
}

impl ChartConfig {
    pub fn with_synthetic_labels(
        mut self,
        tail: impl Into<String>,
        empty: impl Into<String>,
    ) -> Self {
        self.tail_label = tail.into();
        self.empty_label = empty.into();
        self
    }

    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn height_for(&self, bar_count: usize) -> f64 {
        self.item_height * bar_count as f64 + self.margin.top + self.margin.bottom
    }

    fn text_dy(&self) -> f64 {
        self.item_height / 2.0 + self.item_margin
    }

    fn bar_height(&self) -> f64 {
        self.item_height - self.item_margin * 2.0
    }
}

/// Root of a mounted chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub class: &'static str,
    pub width: f64,
    pub height: f64,
    /// Transform of the inner group holding the bars.
    pub transform: String,
    /// Count → pixels. Spans `[0, total]` so bar lengths compare across questions.
    pub x: LinearScale,
}

pub type ExpandHandler = Rc<dyn Fn()>;

/// One bar row: the bar itself plus its three text labels.
#[derive(Clone)]
pub struct BarNode {
    pub key: String,
    pub id: BarId,
    pub class: String,
    pub label: String,
    pub label_x: f64,
    pub transform: String,
    pub bar_width: f64,
    pub bar_height: f64,
    pub text_dy: f64,
    pub count_x: f64,
    pub count_text: String,
    pub percent_x: f64,
    pub percent_text: String,
    on_activate: Option<ExpandHandler>,
}

impl fmt::Debug for BarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarNode")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("class", &self.class)
            .field("label", &self.label)
            .field("transform", &self.transform)
            .field("bar_width", &self.bar_width)
            .field("count_text", &self.count_text)
            .field("percent_text", &self.percent_text)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

impl BarNode {
    /// Empty shell for a newly entered bar. Key, class and label are fixed
    /// for the node's lifetime; geometry is filled in by `apply`.
    fn enter(bar: &GroupedBar, dataset: &QuestionDataset, config: &ChartConfig) -> Self {
        let mut class = String::from("item");
        if let Some(special) = bar.special {
            class.push(' ');
            class.push_str(special.css_class());
        }

        let label = match bar.special {
            Some(Special::Tail) => config.tail_label.clone(),
            Some(Special::Empty) => config.empty_label.clone(),
            None => dataset.display_label(&bar.name).to_string(),
        };

        Self {
            key: bar.name.clone(),
            id: bar.id,
            class,
            label,
            label_x: config.label_x,
            transform: String::new(),
            bar_width: 0.0,
            bar_height: config.bar_height(),
            text_dy: config.text_dy(),
            count_x: 0.0,
            count_text: String::new(),
            percent_x: 0.0,
            percent_text: String::new(),
            on_activate: None,
        }
    }

    fn apply(&mut self, ctx: &ApplyContext<'_>, rank: usize, bar: &GroupedBar) {
        let config = ctx.config;
        let width = ctx.x.apply(bar.count as f64);

        self.id = bar.id;
        self.transform = translate(0.0, ctx.y.apply(rank as f64) + config.item_margin);
        self.bar_width = width;
        self.count_x = width + config.value_offset;
        self.count_text = format_count(bar.count);
        self.percent_x = width - config.value_offset;
        self.percent_text = percent_label(
            bar.count,
            ctx.total,
            width,
            ctx.multiple && bar.is_tail(),
            config,
        );
        self.on_activate = bar.is_tail().then(|| ctx.on_expand_tail.clone());
    }

    /// Only the tail bar reacts to activation.
    pub fn is_interactive(&self) -> bool {
        self.on_activate.is_some()
    }

    /// Run the expand handler. Returns whether the node had one.
    pub fn activate(&self) -> bool {
        match &self.on_activate {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

/// Percentage label for a bar `bar_width` pixels long.
///
/// Empty when the bar is too short to hold it, or when `suppress` is set (the
/// tail of a multi-select question: its tallies overlap).
pub fn percent_label(
    count: u64,
    total: u32,
    bar_width: f64,
    suppress: bool,
    config: &ChartConfig,
) -> String {
    if bar_width <= config.min_percent_width || suppress {
        return String::new();
    }
    format_percent(count, total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Initial,
    Update,
}

/// What a render pass did to the node set, keyed by bar name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub mode: RenderMode,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

impl RenderReport {
    fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            created: Vec::new(),
            updated: Vec::new(),
            removed: Vec::new(),
        }
    }
}

struct ApplyContext<'a> {
    config: &'a ChartConfig,
    x: LinearScale,
    y: LinearScale,
    total: u32,
    multiple: bool,
    on_expand_tail: ExpandHandler,
}

/// Retained chart of one question.
#[derive(Debug)]
pub struct ChartSurface {
    config: ChartConfig,
    frame: Option<ChartFrame>,
    items: Vec<BarNode>,
}

impl ChartSurface {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            frame: None,
            items: Vec::new(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.frame.is_some()
    }

    pub fn frame(&self) -> Option<&ChartFrame> {
        self.frame.as_ref()
    }

    pub fn items(&self) -> &[BarNode] {
        &self.items
    }

    pub fn item(&self, key: &str) -> Option<&BarNode> {
        self.items.iter().find(|node| node.key == key)
    }

    /// Draw `bars` onto the surface.
    ///
    /// `Initial` creates the root sized for the bar count, with the
    /// horizontal scale `[0, total] -> [0, inner width]`. `Update` keeps the
    /// root's width and scale and only resizes its height. An `Update` on an
    /// unmounted surface mounts it.
    pub fn render<F>(
        &mut self,
        dataset: &QuestionDataset,
        bars: &[GroupedBar],
        total: u32,
        mode: RenderMode,
        on_expand_tail: F,
    ) -> RenderReport
    where
        F: Fn() + 'static,
    {
        let height = self.config.height_for(bars.len());
        let mode = match mode {
            RenderMode::Update if self.is_mounted() => RenderMode::Update,
            _ => RenderMode::Initial,
        };
        match mode {
            RenderMode::Update => {
                if let Some(frame) = self.frame.as_mut() {
                    frame.height = height;
                }
            }
            RenderMode::Initial => {
                self.frame = Some(self.mount(height, total));
                self.items.clear();
            }
        }

        let x = self
            .frame
            .as_ref()
            .map(|frame| frame.x)
            .unwrap_or_else(|| self.x_scale(total));
        let inner_height = height - self.config.margin.top - self.config.margin.bottom;
        let ctx = ApplyContext {
            config: &self.config,
            x,
            y: LinearScale::new((0.0, bars.len() as f64), (0.0, inner_height)),
            total,
            multiple: dataset.multiple,
            on_expand_tail: Rc::new(on_expand_tail),
        };

        let mut report = RenderReport::new(mode);
        let old_keys: Vec<String> = self.items.iter().map(|node| node.key.clone()).collect();
        let new_keys: Vec<String> = bars.iter().map(|bar| bar.name.clone()).collect();
        let mut previous: Vec<Option<BarNode>> =
            std::mem::take(&mut self.items).into_iter().map(Some).collect();
        let mut next: Vec<BarNode> = Vec::with_capacity(bars.len());

        for patch in diff_keyed(&old_keys, &new_keys) {
            match patch {
                Patch::Remove { key, index } => {
                    if let Some(slot) = previous.get_mut(index) {
                        slot.take();
                    }
                    report.removed.push(key);
                }
                Patch::Update { key, from, to } => {
                    let node = previous
                        .get_mut(from)
                        .and_then(Option::take)
                        .unwrap_or_else(|| BarNode::enter(&bars[to], dataset, ctx.config));
                    next.push(node);
                    report.updated.push(key);
                }
                Patch::Create { key, index } => {
                    next.push(BarNode::enter(&bars[index], dataset, ctx.config));
                    report.created.push(key);
                }
            }
        }

        for (rank, (node, bar)) in next.iter_mut().zip(bars).enumerate() {
            node.apply(&ctx, rank, bar);
        }
        self.items = next;

        report
    }

    fn mount(&self, height: f64, total: u32) -> ChartFrame {
        ChartFrame {
            class: "svg-main",
            width: self.config.width,
            height,
            transform: translate(self.config.margin.left, self.config.margin.top),
            x: self.x_scale(total),
        }
    }

    fn x_scale(&self, total: u32) -> LinearScale {
        LinearScale::new((0.0, f64::from(total)), (0.0, self.config.inner_width()))
    }
}

/// Full pipeline for one pass: group with `limit`, then render.
pub fn redraw<F>(
    surface: &mut ChartSurface,
    dataset: &QuestionDataset,
    limit: Option<i64>,
    total: u32,
    on_expand_tail: F,
) -> Result<RenderReport, GroupError>
where
    F: Fn() + 'static,
{
    let bars = group(dataset, limit)?;
    let mode = if surface.is_mounted() {
        RenderMode::Update
    } else {
        RenderMode::Initial
    };
    Ok(surface.render(dataset, &bars, total, mode, on_expand_tail))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> QuestionDataset {
        serde_json::from_value(value).unwrap()
    }

    fn countries() -> QuestionDataset {
        dataset(json!({
            "title": "Страна",
            "limit": 2,
            "values": [
                { "value": null, "count": 4 },
                { "value": "Германия", "count": 6 },
                { "value": "Россия", "count": 120 },
                { "value": "США", "count": 10 },
                { "value": "Украина", "count": 40 },
                { "value": "Израиль", "count": 20 }
            ]
        }))
    }

    fn noop() {}

    #[test]
    fn initial_render_mounts_root() {
        let ds = countries();
        let mut surface = ChartSurface::new(ChartConfig::default());
        let report = redraw(&mut surface, &ds, None, 200, noop).unwrap();

        assert_eq!(report.mode, RenderMode::Initial);
        assert_eq!(report.created, vec!["Россия", "Украина", "tail", "Не указано"]);

        let frame = surface.frame().unwrap();
        assert_eq!(frame.class, "svg-main");
        assert_eq!(frame.width, 860.0);
        assert_eq!(frame.height, 20.0 * 4.0 + 10.0);
        assert_eq!(frame.transform, "translate(360,10)");
        assert_eq!(frame.x.range, (0.0, 480.0));

        let russia = surface.item("Россия").unwrap();
        assert_eq!(russia.bar_width, 288.0);
        assert_eq!(russia.count_text, "120");
        assert_eq!(russia.percent_text, "60%");
        assert_eq!(russia.transform, "translate(0,2)");
        assert_eq!(russia.bar_height, 16.0);
        assert_eq!(russia.text_dy, 12.0);
        assert_eq!(russia.count_x, 291.0);
        assert_eq!(russia.percent_x, 285.0);
        assert_eq!(surface.item("Украина").unwrap().transform, "translate(0,22)");
    }

    #[test]
    fn expanding_tail_reconciles_by_name() {
        let ds = countries();
        let mut surface = ChartSurface::new(ChartConfig::default());
        redraw(&mut surface, &ds, None, 200, noop).unwrap();
        let report = redraw(&mut surface, &ds, Some(12), 200, noop).unwrap();

        assert_eq!(report.mode, RenderMode::Update);
        assert_eq!(report.removed, vec!["tail"]);
        assert_eq!(report.created, vec!["Израиль", "США", "Германия"]);
        assert_eq!(report.updated, vec!["Россия", "Украина", "Не указано"]);

        let frame = surface.frame().unwrap();
        assert_eq!(frame.height, 20.0 * 6.0 + 10.0);
        assert_eq!(frame.width, 860.0);
        assert_eq!(surface.item("Не указано").unwrap().transform, "translate(0,102)");
        assert!(surface.items().iter().all(|node| !node.is_interactive()));
    }

    #[test]
    fn surviving_bar_keeps_key_when_rank_moves() {
        let ds = countries();
        let mut surface = ChartSurface::new(ChartConfig::default());
        redraw(&mut surface, &ds, None, 200, noop).unwrap();
        let before = surface.items().iter().position(|node| node.key == "Не указано");
        assert_eq!(before, Some(3));

        let report = redraw(&mut surface, &ds, Some(12), 200, noop).unwrap();
        let after = surface.items().iter().position(|node| node.key == "Не указано");
        assert_eq!(after, Some(5));
        assert!(report.updated.iter().any(|key| key == "Не указано"));
        assert!(!report.created.iter().any(|key| key == "Не указано"));
        let keys: Vec<&str> = surface.items().iter().map(|node| node.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["Россия", "Украина", "Израиль", "США", "Германия", "Не указано"]
        );
    }

    #[test]
    fn scale_is_fixed_after_mount() {
        let ds = countries();
        let mut surface = ChartSurface::new(ChartConfig::default());
        redraw(&mut surface, &ds, None, 200, noop).unwrap();
        redraw(&mut surface, &ds, Some(3), 400, noop).unwrap();
        assert_eq!(surface.frame().unwrap().x.domain, (0.0, 200.0));
    }

    #[test]
    fn only_tail_triggers_expansion() {
        let ds = countries();
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut surface = ChartSurface::new(ChartConfig::default());
        redraw(&mut surface, &ds, None, 200, move || counter.set(counter.get() + 1)).unwrap();

        assert!(!surface.item("Россия").unwrap().activate());
        assert!(!surface.item("Не указано").unwrap().activate());
        assert!(surface.item("tail").unwrap().activate());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn synthetic_bars_carry_extra_class_and_label() {
        let ds = countries();
        let config = ChartConfig::default().with_synthetic_labels("Other", "Not specified");
        let mut surface = ChartSurface::new(config);
        redraw(&mut surface, &ds, None, 200, noop).unwrap();

        let tail = surface.item("tail").unwrap();
        assert_eq!(tail.class, "item item__tail");
        assert_eq!(tail.label, "Other");
        assert_eq!(tail.count_text, "36");
        let empty = surface.item("Не указано").unwrap();
        assert_eq!(empty.class, "item item__empty");
        assert_eq!(empty.label, "Not specified");
        assert_eq!(surface.item("Россия").unwrap().class, "item");
    }

    #[test]
    fn shortcuts_shorten_labels() {
        let ds = dataset(json!({
            "title": "Образование",
            "shortcuts": { "Высшее (магистр или специалист)": "Магистр/специалист" },
            "values": [{ "value": "Высшее (магистр или специалист)", "count": 3 }]
        }));
        let mut surface = ChartSurface::new(ChartConfig::default());
        redraw(&mut surface, &ds, None, 10, noop).unwrap();
        assert_eq!(
            surface.item("Высшее (магистр или специалист)").unwrap().label,
            "Магистр/специалист"
        );
    }

    #[test]
    fn percent_hidden_on_short_bars() {
        let config = ChartConfig::default();
        assert_eq!(percent_label(5, 100, 20.0, false, &config), "");
        assert_eq!(percent_label(37, 100, 177.6, false, &config), "37%");
    }

    #[test]
    fn multi_select_tail_has_no_percent() {
        let mut ds = countries();
        ds.multiple = true;
        let mut surface = ChartSurface::new(ChartConfig::default());
        redraw(&mut surface, &ds, None, 200, noop).unwrap();

        assert_eq!(surface.item("tail").unwrap().percent_text, "");
        assert_eq!(surface.item("Россия").unwrap().percent_text, "60%");
    }

    #[test]
    fn update_on_unmounted_surface_mounts() {
        let ds = countries();
        let bars = group(&ds, None).unwrap();
        let mut surface = ChartSurface::new(ChartConfig::default());
        let report = surface.render(&ds, &bars, 200, RenderMode::Update, noop);
        assert_eq!(report.mode, RenderMode::Initial);
        assert!(surface.is_mounted());
    }

    #[test]
    fn initial_on_mounted_surface_recreates() {
        let ds = countries();
        let bars = group(&ds, None).unwrap();
        let mut surface = ChartSurface::new(ChartConfig::default());
        surface.render(&ds, &bars, 200, RenderMode::Initial, noop);
        let report = surface.render(&ds, &bars, 200, RenderMode::Initial, noop);
        assert_eq!(report.created.len(), bars.len());
        assert!(report.updated.is_empty());
        assert_eq!(surface.items().len(), bars.len());
    }

    #[test]
    fn zero_total_draws_flat_bars() {
        let ds = countries();
        let mut surface = ChartSurface::new(ChartConfig::default());
        redraw(&mut surface, &ds, None, 0, noop).unwrap();
        assert!(surface
            .items()
            .iter()
            .all(|node| node.bar_width == 0.0 && node.percent_text.is_empty()));
    }
}
