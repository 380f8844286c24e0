//! Widget instances keyed by the container they live in.

use std::collections::HashMap;
use std::fmt;

use crate::config::WidgetOptions;
use crate::content::Document;
use crate::error::{CarouscrollError, Result};
use crate::rotator::FALLOFF;
use crate::widget::{EventResult, Widget, WidgetEvent, WidgetHost};

/// Identifier of the container a widget is mounted in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContainerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns every widget instance and the one-time style installation
#[derive(Debug, Default)]
pub struct Registry {
    widgets: HashMap<ContainerId, Widget>,
    defaults: WidgetOptions,
    styles_installed: bool,
}

impl Registry {
    pub fn new(defaults: WidgetOptions) -> Self {
        Self {
            widgets: HashMap::new(),
            defaults,
            styles_installed: false,
        }
    }

    pub fn get(&self, container: &ContainerId) -> Option<&Widget> {
        self.widgets.get(container)
    }

    pub fn contains(&self, container: &ContainerId) -> bool {
        self.widgets.contains_key(container)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Create a widget in `container`, replacing any existing one.
    ///
    /// On failure nothing is stored and a prior instance stays in place.
    pub fn create<H: WidgetHost>(
        &mut self,
        container: impl Into<ContainerId>,
        document: &Document,
        labels: Option<&[String]>,
        options: Option<WidgetOptions>,
        host: &mut H,
    ) -> Result<()> {
        let container = container.into();
        self.ensure_styles(host);

        let options = options.unwrap_or_else(|| self.defaults.clone());
        match Widget::create(document, labels, options, host) {
            Ok(widget) => {
                tracing::info!(
                    container = %container,
                    titles = widget.state().table().len(),
                    sections = widget.state().table().section_count(),
                    "carousel created"
                );
                if self.widgets.insert(container.clone(), widget).is_some() {
                    tracing::debug!(container = %container, "replaced existing carousel");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(container = %container, "carousel not created: {err}");
                Err(err)
            }
        }
    }

    /// Swap the content of an existing widget, keeping its handlers
    pub fn change_content<H: WidgetHost>(
        &mut self,
        container: &ContainerId,
        document: &Document,
        labels: Option<&[String]>,
        host: &mut H,
    ) -> Result<()> {
        let widget = self.widget_mut(container).map_err(|err| {
            tracing::warn!("content not changed: {err}");
            err
        })?;
        widget.change_content(document, labels, host).map_err(|err| {
            tracing::warn!(container = %container, "content not changed: {err}");
            err
        })
    }

    /// Unmount and drop the widget. Returns whether one existed.
    pub fn remove<H: WidgetHost>(&mut self, container: &ContainerId, host: &mut H) -> bool {
        match self.widgets.remove(container) {
            Some(_) => {
                host.clear();
                tracing::info!(container = %container, "carousel removed");
                true
            }
            None => false,
        }
    }

    pub fn dispatch<H: WidgetHost>(
        &mut self,
        container: &ContainerId,
        event: WidgetEvent,
        host: &mut H,
    ) -> Result<EventResult> {
        let widget = self.widget_mut(container)?;
        Ok(widget.handle(event, host))
    }

    pub fn relayout<H: WidgetHost>(&mut self, container: &ContainerId, host: &mut H) -> Result<()> {
        self.widget_mut(container)?.relayout(host)
    }

    fn widget_mut(&mut self, container: &ContainerId) -> Result<&mut Widget> {
        self.widgets
            .get_mut(container)
            .ok_or_else(|| CarouscrollError::UnknownContainer(container.to_string()))
    }

    fn ensure_styles<H: WidgetHost>(&mut self, host: &mut H) {
        if self.styles_installed {
            return;
        }
        if !host.has_style_marker() {
            host.install_styles(&FALLOFF);
        }
        self.styles_installed = true;
    }
}
