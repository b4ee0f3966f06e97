//! ThemeApplier — maps a descriptor onto named visual assignments.
//!
//! [`ThemeApplier::assignments_for`] is pure: same descriptor in, same
//! assignment set out. The applier keeps the last-applied descriptor so the
//! per-tick card highlighting can re-derive colors through
//! [`ThemeApplier::card_style`] without redoing the whole pass.

use std::collections::BTreeMap;

use tracing::info;

use super::{ThemeDescriptor, BUTTON_SHADOW, SELECTED_CARD_TEXT_COLOR};

/// Value assigned to the container when the page has an image background.
pub const TRANSPARENT: &str = "transparent";

/// Element a visual assignment lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Body,
    Container,
    DisplayArea,
    StartButton,
    StopButton,
    /// Base style shared by every student card.
    StudentCard,
    Footer,
}

/// Style property being assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    BackgroundImage,
    BackgroundColor,
    /// Shorthand `background` (color or image).
    Background,
    BorderColor,
    Color,
    FontSize,
    BoxShadow,
}

/// Ordered set of `(target, property) → value` assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualAssignments {
    entries: BTreeMap<(Target, Property), String>,
}

impl VisualAssignments {
    fn set(&mut self, target: Target, property: Property, value: impl Into<String>) {
        self.entries.insert((target, property), value.into());
    }

    pub fn get(&self, target: Target, property: Property) -> Option<&str> {
        self.entries.get(&(target, property)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Target, Property, &str)> {
        self.entries.iter().map(|(&(t, p), v)| (t, p, v.as_str()))
    }

    /// Assignments for one target, in property order.
    pub fn for_target(&self, target: Target) -> impl Iterator<Item = (Property, &str)> {
        self.iter()
            .filter(move |(t, _, _)| *t == target)
            .map(|(_, p, v)| (p, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved style of one student card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    pub background: String,
    pub border_color: String,
    pub color: String,
    pub selected: bool,
}

/// Owns the applied theme and its assignments.
#[derive(Debug, Clone)]
pub struct ThemeApplier {
    current: ThemeDescriptor,
    assignments: VisualAssignments,
}

impl Default for ThemeApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeApplier {
    /// Applier with the default theme already applied.
    pub fn new() -> Self {
        let current = ThemeDescriptor::default();
        let assignments = Self::assignments_for(&current);
        Self {
            current,
            assignments,
        }
    }

    /// Make `descriptor` the current theme and return its assignments.
    pub fn apply(&mut self, descriptor: ThemeDescriptor) -> &VisualAssignments {
        self.assignments = Self::assignments_for(&descriptor);
        info!(theme = %descriptor.theme_name, "theme applied");
        self.current = descriptor;
        &self.assignments
    }

    /// Last-applied descriptor.
    pub fn current(&self) -> &ThemeDescriptor {
        &self.current
    }

    pub fn assignments(&self) -> &VisualAssignments {
        &self.assignments
    }

    /// The full mapping for a descriptor. No validation: values pass
    /// through as given.
    pub fn assignments_for(theme: &ThemeDescriptor) -> VisualAssignments {
        let mut out = VisualAssignments::default();
        let image_background = theme.has_image_background();
        let text_color = theme.text_color_or_default();

        out.set(Target::Body, Property::BackgroundImage, &theme.background_color);
        if !image_background {
            out.set(Target::Body, Property::BackgroundColor, &theme.background_color);
        }

        let container = if image_background {
            TRANSPARENT
        } else {
            theme.container_background_color.as_str()
        };
        out.set(Target::Container, Property::BackgroundColor, container);

        out.set(
            Target::DisplayArea,
            Property::Background,
            &theme.display_area_background_color,
        );
        out.set(
            Target::DisplayArea,
            Property::BorderColor,
            &theme.display_area_border_color,
        );
        out.set(Target::DisplayArea, Property::Color, text_color);
        out.set(
            Target::DisplayArea,
            Property::FontSize,
            theme.name_display_size_or_default(),
        );

        out.set(Target::StartButton, Property::Background, &theme.start_btn_background);
        out.set(Target::StartButton, Property::BoxShadow, BUTTON_SHADOW);
        out.set(Target::StopButton, Property::Background, &theme.stop_btn_background);
        out.set(Target::StopButton, Property::BoxShadow, BUTTON_SHADOW);

        out.set(Target::StudentCard, Property::Background, &theme.student_card_background);
        out.set(
            Target::StudentCard,
            Property::BorderColor,
            &theme.student_card_border_color,
        );
        out.set(Target::StudentCard, Property::Color, text_color);

        out.set(
            Target::Footer,
            Property::BackgroundColor,
            &theme.footer_background_color,
        );
        out
    }

    /// Style for card `index` given the current selection.
    pub fn card_style(&self, index: usize, selected: Option<usize>) -> CardStyle {
        let theme = &self.current;
        if selected == Some(index) {
            CardStyle {
                background: theme.student_card_selected_background.clone(),
                border_color: theme.student_card_selected_border_color.clone(),
                color: SELECTED_CARD_TEXT_COLOR.into(),
                selected: true,
            }
        } else {
            CardStyle {
                background: theme.student_card_background.clone(),
                border_color: theme.student_card_border_color.clone(),
                color: theme.text_color_or_default().into(),
                selected: false,
            }
        }
    }

    /// Styles for `count` cards. At most one is selected; an out-of-range
    /// selection selects none.
    pub fn card_styles(&self, count: usize, selected: Option<usize>) -> Vec<CardStyle> {
        (0..count).map(|i| self.card_style(i, selected)).collect()
    }
}
