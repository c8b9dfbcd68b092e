//! Interactive preview state and key handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::{self, Terminal};
use crate::domain::{
    BadgeContent, BadgeProps, Color as BadgeColor, OverrideRegistry, Registered, ResolveContext,
    ResolvedBadge, Variant,
};

/// Application state
pub struct App<'a> {
    /// Props being edited
    props: BadgeProps<Registered, Registered>,

    /// Registered names, for cycling variants and colors
    registry: &'a OverrideRegistry,

    ctx: ResolveContext<'a>,

    /// Label of the wrapped box
    child: String,

    child_width: u16,
    child_height: u16,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(
        props: BadgeProps<Registered, Registered>,
        registry: &'a OverrideRegistry,
        ctx: ResolveContext<'a>,
        child: &str,
        child_size: (u16, u16),
    ) -> Self {
        Self {
            props,
            registry,
            ctx,
            child: child.to_string(),
            child_width: child_size.0,
            child_height: child_size.1,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        ui::draw(frame, self);
    }

    pub fn props(&self) -> &BadgeProps<Registered, Registered> {
        &self.props
    }

    pub fn child(&self) -> &str {
        &self.child
    }

    pub fn child_size(&self) -> (u16, u16) {
        (self.child_width, self.child_height)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Resolves the current props
    pub fn resolved(&self) -> crate::domain::Result<ResolvedBadge> {
        self.props.resolve(&self.ctx)
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        self.status_message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char('a') => {
                self.props.anchor_origin = self.props.anchor_origin.next();
            }
            KeyCode::Char('o') => {
                self.props.overlap = self.props.overlap.toggle();
            }
            KeyCode::Char('v') => self.cycle_variant(),
            KeyCode::Char('c') => self.cycle_color(),

            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => self.adjust_count(1),
            KeyCode::Char('-') | KeyCode::Down => self.adjust_count(-1),

            KeyCode::Char('z') => {
                self.props.show_zero = !self.props.show_zero;
                self.status_message = Some(format!("showZero: {}", self.props.show_zero));
            }
            KeyCode::Char('i') => {
                let invisible = !self.props.invisible.unwrap_or(false);
                self.props.invisible = Some(invisible);
                self.status_message = Some(format!("invisible: {}", invisible));
            }

            _ => {}
        }
    }

    fn cycle_variant(&mut self) {
        let names: Vec<&str> = Variant::<Registered>::BUILTIN
            .iter()
            .copied()
            .chain(self.registry.variants())
            .collect();
        let next = next_name(&names, self.props.variant.name());

        match self.registry.variant(next) {
            Ok(variant) => self.props.variant = variant,
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    fn cycle_color(&mut self) {
        let names: Vec<&str> = BadgeColor::<Registered>::BUILTIN
            .iter()
            .copied()
            .chain(self.registry.colors())
            .collect();
        let next = next_name(&names, self.props.color.name());

        match self.registry.color(next) {
            Ok(color) => self.props.color = color,
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Steps numeric content; text content restarts from zero
    fn adjust_count(&mut self, delta: i64) {
        let current = match &self.props.badge_content {
            Some(BadgeContent::Number(n)) => *n,
            _ => 0,
        };
        let next = current.saturating_add(delta).max(0);
        self.props.badge_content = Some(BadgeContent::Number(next));
    }
}

/// The entry after `current`, wrapping around
fn next_name<'n>(names: &[&'n str], current: &str) -> &'n str {
    let index = names.iter().position(|name| *name == current).unwrap_or(0);
    names[(index + 1) % names.len()]
}
