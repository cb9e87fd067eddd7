//! HTML rendering of the login form and dashboard pages.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

use crate::constants::MSG_NO_DATA;
use crate::pages::{Block, PageContent, PageKind, Panel, PanelWidth};
use crate::pipeline::TableDescriptor;
use crate::session::Principal;

#[derive(Debug, Serialize)]
struct NavItem {
    label: &'static str,
    href: &'static str,
    active: bool,
}

#[derive(Debug, Serialize)]
struct GridView {
    id: String,
    height: &'static str,
    /// Grid options as a JSON literal, safe to embed in a script element
    options: String,
}

#[derive(Debug, Serialize)]
struct PanelView {
    style: String,
    title: String,
    grid: Option<GridView>,
    placeholder: &'static str,
}

#[derive(Debug, Serialize)]
struct BlockView {
    notice: Option<&'static str>,
    panels: Vec<PanelView>,
}

#[derive(Debug, Serialize)]
struct PageView<'a> {
    title: &'static str,
    user: &'a str,
    nav: Vec<NavItem>,
    blocks: Vec<BlockView>,
}

impl PanelView {
    fn new(table: &TableDescriptor, width: PanelWidth) -> Self {
        let grid = match table {
            TableDescriptor::Empty { .. } => None,
            TableDescriptor::Grid(grid) => Some(GridView {
                id: grid.id.to_string(),
                height: grid.options.height,
                options: script_safe_json(&grid.grid_options()),
            }),
        };

        Self {
            style: width.css(),
            title: table.title().to_string(),
            grid,
            placeholder: MSG_NO_DATA,
        }
    }
}

impl From<&Block> for BlockView {
    fn from(block: &Block) -> Self {
        match block {
            Block::Table(table) => BlockView {
                notice: None,
                panels: vec![PanelView::new(table, PanelWidth::Flex)],
            },
            Block::Row(panels) => BlockView {
                notice: None,
                panels: panels
                    .iter()
                    .map(|Panel { table, width }| PanelView::new(table, *width))
                    .collect(),
            },
            Block::Notice(message) => BlockView {
                notice: Some(*message),
                panels: Vec::new(),
            },
        }
    }
}

// `</script>` inside a string literal would end the script element early
fn script_safe_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Compiled page templates
pub struct Templates {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string("login", include_str!("../templates/login.hbs"))?;
        registry.register_template_string("page", include_str!("../templates/page.hbs"))?;
        registry.register_partial("panel", include_str!("../templates/panel.hbs"))?;

        Ok(Self { registry })
    }

    /// Login form
    pub fn login(&self) -> Result<String, RenderError> {
        self.registry.render("login", &())
    }

    /// Dashboard page for `principal`
    pub fn page(&self, principal: &Principal, content: &PageContent) -> Result<String, RenderError> {
        let nav = PageKind::NAVIGABLE
            .iter()
            .filter_map(|&kind| {
                kind.href().map(|href| NavItem {
                    label: kind.title(),
                    href,
                    active: kind == content.kind,
                })
            })
            .collect();

        let view = PageView {
            title: content.kind.title(),
            user: &principal.email,
            nav,
            blocks: content.blocks.iter().map(BlockView::from).collect(),
        };

        self.registry.render("page", &view)
    }
}
