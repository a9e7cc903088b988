//! Context menu: a serializable description built from [`MenuState`], and the
//! popup that shows it inside the bubble window one level at a time.

use serde::{Deserialize, Serialize};

use crate::draw::{GLYPH_ADVANCE, draw_text_5x7, fill_rect, stroke_rect};
use crate::messages::{MenuAction, MenuState};
use crate::shape::{BorderTheme, ShapePreset, SizePreset};
use crate::types::FrameBuffer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MenuItem {
    Action {
        label: String,
        /// `Some` for radio/check items.
        checked: Option<bool>,
        enabled: bool,
        action: MenuAction,
    },
    Submenu {
        label: String,
        items: Vec<MenuItem>,
    },
    Separator,
}

impl MenuItem {
    fn action(label: impl Into<String>, action: MenuAction) -> Self {
        MenuItem::Action { label: label.into(), checked: None, enabled: true, action }
    }

    fn radio(label: impl Into<String>, checked: bool, action: MenuAction) -> Self {
        MenuItem::Action { label: label.into(), checked: Some(checked), enabled: true, action }
    }

    fn disabled(label: impl Into<String>) -> Self {
        MenuItem::Action { label: label.into(), checked: None, enabled: false, action: MenuAction::RetryCamera }
    }

    fn text(&self) -> String {
        match self {
            MenuItem::Action { label, checked: Some(true), .. } => format!("* {label}"),
            MenuItem::Action { label, checked: Some(false), .. } => format!("  {label}"),
            MenuItem::Action { label, checked: None, .. } => label.clone(),
            MenuItem::Submenu { label, .. } => format!("{label} >"),
            MenuItem::Separator => String::new(),
        }
    }
}

pub fn build_menu(state: &MenuState) -> Vec<MenuItem> {
    let mut shape_items: Vec<MenuItem> = ShapePreset::ALL
        .iter()
        .map(|p| MenuItem::radio(p.label(), state.shape == Some(*p), MenuAction::Shape(*p)))
        .collect();
    if state.custom_enabled {
        shape_items.push(MenuItem::Separator);
        shape_items.push(MenuItem::radio("CUSTOM", state.shape.is_none(), MenuAction::CustomMode));
    }

    let size_items = SizePreset::ALL
        .iter()
        .map(|s| MenuItem::radio(s.label(), state.size == Some(*s), MenuAction::Size(*s)))
        .collect();

    let mut camera_items: Vec<MenuItem> = state
        .cameras
        .iter()
        .map(|c| MenuItem::radio(c.label.to_uppercase(), c.active, MenuAction::Camera(c.index)))
        .collect();
    if camera_items.is_empty() {
        camera_items.push(MenuItem::disabled("NO CAMERAS FOUND"));
    }
    if !state.camera_live {
        camera_items.push(MenuItem::Separator);
        camera_items.push(MenuItem::action("RETRY", MenuAction::RetryCamera));
    }

    let mut items = vec![
        MenuItem::Submenu { label: "SHAPE".into(), items: shape_items },
        MenuItem::Submenu { label: "SIZE".into(), items: size_items },
        MenuItem::Separator,
        MenuItem::Submenu { label: "CAMERA".into(), items: camera_items },
        MenuItem::radio("MIRROR", state.mirrored, MenuAction::Mirror),
    ];
    if state.themes_enabled {
        let themes = BorderTheme::ALL
            .iter()
            .map(|t| MenuItem::radio(t.label(), state.border == *t, MenuAction::Border(*t)))
            .collect();
        items.push(MenuItem::Submenu { label: "BORDER".into(), items: themes });
    }
    items.push(MenuItem::radio("CLICK-THROUGH", state.click_through, MenuAction::ClickThrough));
    items.push(MenuItem::Separator);
    items.push(MenuItem::action("QUIT", MenuAction::Quit));
    items
}

const ROW_HEIGHT: i32 = 11;
const SEPARATOR_HEIGHT: i32 = 5;
const PAD_X: i32 = 4;
const BACK_LABEL: &str = "< BACK";
const ELLIPSIS: &str = "...";

const BG: u32 = 0xF0_1E_1E_22;
const FG: u32 = 0xFF_EE_EE_EE;
const FG_DISABLED: u32 = 0xFF_77_77_77;
const HOVER: u32 = 0xFF_3B_82_F6;
const OUTLINE: u32 = 0xFF_55_55_5C;

#[derive(Debug, Clone, PartialEq)]
pub enum PopupOutcome {
    /// Click landed on a submenu, back row, separator or disabled item.
    Stay,
    /// Click landed outside the popup.
    Dismiss,
    Selected(MenuAction),
}

/// Row hit areas for the level currently shown.
enum Row<'a> {
    Back,
    Item(usize, &'a MenuItem),
}

#[derive(Debug, Clone)]
pub struct PopupMenu {
    root: Vec<MenuItem>,
    /// Indices of opened submenus, outermost first.
    path: Vec<usize>,
    anchor: (i32, i32),
    hover: Option<usize>,
}

impl PopupMenu {
    pub fn new(items: Vec<MenuItem>, anchor: (i32, i32)) -> Self {
        Self { root: items, path: Vec::new(), anchor, hover: None }
    }

    fn level(&self) -> &[MenuItem] {
        let mut items = self.root.as_slice();
        for &i in &self.path {
            match items.get(i) {
                Some(MenuItem::Submenu { items: sub, .. }) => items = sub,
                _ => break,
            }
        }
        items
    }

    fn rows(&self) -> Vec<Row<'_>> {
        let mut rows = Vec::new();
        if !self.path.is_empty() {
            rows.push(Row::Back);
        }
        rows.extend(self.level().iter().enumerate().map(|(i, item)| Row::Item(i, item)));
        rows
    }

    fn row_height(row: &Row<'_>) -> i32 {
        match row {
            Row::Item(_, MenuItem::Separator) => SEPARATOR_HEIGHT,
            _ => ROW_HEIGHT,
        }
    }

    fn row_text(row: &Row<'_>) -> String {
        match row {
            Row::Back => BACK_LABEL.to_string(),
            Row::Item(_, item) => item.text(),
        }
    }

    /// Most glyphs a row can hold in a `view_w` wide window.
    fn max_chars(view_w: i32) -> usize {
        ((view_w - 2 * PAD_X) / GLYPH_ADVANCE).max(0) as usize
    }

    /// Row text cut to `max` glyphs, ending in an ellipsis when shortened.
    fn fit(text: String, max: usize) -> String {
        if text.chars().count() <= max {
            return text;
        }
        let keep = max.saturating_sub(ELLIPSIS.len());
        let mut cut: String = text.chars().take(keep).collect();
        cut.push_str(&ELLIPSIS[..max.min(ELLIPSIS.len())]);
        cut
    }

    /// Popup size for the current level in a `view` sized window. Rows too
    /// long for the window are shortened, so the width never exceeds it.
    pub fn size(&self, view: (i32, i32)) -> (i32, i32) {
        let rows = self.rows();
        let max = Self::max_chars(view.0);
        let chars = rows.iter().map(|r| Self::row_text(r).chars().count().min(max)).max().unwrap_or(0) as i32;
        let width = chars * GLYPH_ADVANCE + 2 * PAD_X;
        let height = rows.iter().map(Self::row_height).sum::<i32>() + 4;
        (width, height)
    }

    /// Top-left corner, pulled back inside a `view_w` x `view_h` window when needed.
    fn origin(&self, view_w: i32, view_h: i32) -> (i32, i32) {
        let (w, h) = self.size((view_w, view_h));
        let x = self.anchor.0.min(view_w - w).max(0);
        let y = self.anchor.1.min(view_h - h).max(0);
        (x, y)
    }

    fn row_at(&self, x: f64, y: f64, view: (i32, i32)) -> Option<usize> {
        let (ox, oy) = self.origin(view.0, view.1);
        let (w, h) = self.size(view);
        let (x, y) = (x as i32, y as i32);
        if x < ox || x >= ox + w || y < oy || y >= oy + h {
            return None;
        }
        let mut top = oy + 2;
        for (i, row) in self.rows().iter().enumerate() {
            let rh = Self::row_height(row);
            if y >= top && y < top + rh {
                return Some(i);
            }
            top += rh;
        }
        None
    }

    pub fn hover(&mut self, x: f64, y: f64, view: (i32, i32)) {
        self.hover = self.row_at(x, y, view);
    }

    pub fn click(&mut self, x: f64, y: f64, view: (i32, i32)) -> PopupOutcome {
        let Some(index) = self.row_at(x, y, view) else {
            return PopupOutcome::Dismiss;
        };
        let rows = self.rows();
        let outcome = match rows.get(index) {
            Some(Row::Back) => Err(None),
            Some(Row::Item(i, MenuItem::Submenu { .. })) => Err(Some(*i)),
            Some(Row::Item(_, MenuItem::Action { enabled: true, action, .. })) => Ok(*action),
            _ => return PopupOutcome::Stay,
        };
        match outcome {
            Ok(action) => PopupOutcome::Selected(action),
            Err(open) => {
                match open {
                    Some(i) => self.path.push(i),
                    None => {
                        self.path.pop();
                    }
                }
                self.hover = None;
                PopupOutcome::Stay
            }
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        let view = (fb.width as i32, fb.height as i32);
        let (ox, oy) = self.origin(view.0, view.1);
        let (w, h) = self.size(view);
        let max = Self::max_chars(view.0);
        fill_rect(fb, ox, oy, w, h, BG);
        stroke_rect(fb, ox, oy, w, h, OUTLINE);

        let mut top = oy + 2;
        for (i, row) in self.rows().iter().enumerate() {
            let rh = Self::row_height(row);
            match row {
                Row::Item(_, MenuItem::Separator) => {
                    fill_rect(fb, ox + PAD_X, top + rh / 2, w - 2 * PAD_X, 1, OUTLINE);
                }
                _ => {
                    if self.hover == Some(i) {
                        fill_rect(fb, ox + 1, top, w - 2, rh, HOVER);
                    }
                    let color = match row {
                        Row::Item(_, MenuItem::Action { enabled: false, .. }) => FG_DISABLED,
                        _ => FG,
                    };
                    draw_text_5x7(fb, ox + PAD_X, top + 2, &Self::fit(Self::row_text(row), max), color);
                }
            }
            top += rh;
        }
    }
}
