//! Typed grid display options.
//!
//! These serialize to the option object understood by the client-side grid
//! (AG Grid). Only the options listed here are ever emitted.

use serde_json::{json, Map, Value as Json};

use super::columns::ColumnDef;

/// Column filter widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// The grid's type-appropriate default filter
    Default,
    /// Multi-filter combining value and text filters
    MultiColumn,
}

/// Buttons shown in a column filter popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterButton {
    Apply,
    Reset,
}

impl FilterButton {
    fn as_str(self) -> &'static str {
        match self {
            FilterButton::Apply => "apply",
            FilterButton::Reset => "reset",
        }
    }
}

/// How columns share the grid width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSizing {
    /// Every column gets `flex: 1`
    Flex,
    /// Columns are fitted to the grid width on render and resize
    ResponsiveSizeToFit,
}

/// Row selection mode; only single-row selection is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelection {
    Single,
}

/// Options applied to every column unless a column overrides them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultColumnOptions {
    pub sortable: bool,
    pub resizable: bool,
    pub filter: FilterKind,
    pub filter_buttons: Vec<FilterButton>,
    pub close_on_apply: bool,
    pub initial_width: Option<u32>,
    pub wrap_header_text: bool,
    pub auto_header_height: bool,
}

impl Default for DefaultColumnOptions {
    /// Sortable, resizable, default filter with apply/reset buttons
    fn default() -> Self {
        Self {
            sortable: true,
            resizable: true,
            filter: FilterKind::Default,
            filter_buttons: vec![FilterButton::Apply, FilterButton::Reset],
            close_on_apply: true,
            initial_width: None,
            wrap_header_text: false,
            auto_header_height: false,
        }
    }
}

/// Display options of one grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptions {
    pub default_column: DefaultColumnOptions,
    pub sizing: ColumnSizing,
    pub animate_rows: bool,
    pub row_selection: Option<RowSelection>,
    pub enable_cell_text_selection: bool,
    pub ensure_dom_order: bool,
    /// CSS height of the grid element
    pub height: &'static str,
}

impl GridOptions {
    /// Compact calendar tables (dividends, earnings)
    pub fn calendar() -> Self {
        Self {
            default_column: DefaultColumnOptions::default(),
            sizing: ColumnSizing::Flex,
            animate_rows: false,
            row_selection: None,
            enable_cell_text_selection: false,
            ensure_dom_order: false,
            height: "45vh",
        }
    }

    /// Wide position grids with wrapped headers and multi-filters
    pub fn master() -> Self {
        Self {
            default_column: DefaultColumnOptions {
                filter: FilterKind::MultiColumn,
                initial_width: Some(200),
                wrap_header_text: true,
                auto_header_height: true,
                ..DefaultColumnOptions::default()
            },
            sizing: ColumnSizing::ResponsiveSizeToFit,
            animate_rows: true,
            row_selection: Some(RowSelection::Single),
            enable_cell_text_selection: true,
            ensure_dom_order: true,
            height: "30vh",
        }
    }

    /// Serialize a column definition under these options
    pub fn column_json(&self, def: &ColumnDef) -> Json {
        let mut col = Map::new();
        col.insert("headerName".into(), json!(def.header_name));
        col.insert("field".into(), json!(def.field));
        if self.sizing == ColumnSizing::Flex {
            col.insert("flex".into(), json!(1));
        }
        if def.numeric {
            col.insert("type".into(), json!("numericColumn"));
        }
        if let Some(style) = &def.style {
            col.insert("cellStyle".into(), json!(style));
        }
        Json::Object(col)
    }

    /// Full grid option object for the given columns and row records
    pub fn to_json(&self, columns: &[ColumnDef], rows: &[Map<String, Json>]) -> Json {
        let defaults = &self.default_column;
        let buttons: Vec<&str> = defaults
            .filter_buttons
            .iter()
            .map(|b| b.as_str())
            .collect();

        let mut default_col = json!({
            "sortable": defaults.sortable,
            "resizable": defaults.resizable,
            "filter": match defaults.filter {
                FilterKind::Default => json!(true),
                FilterKind::MultiColumn => json!("agMultiColumnFilter"),
            },
            "filterParams": {
                "buttons": buttons,
                "closeOnApply": defaults.close_on_apply,
            },
            "wrapHeaderText": defaults.wrap_header_text,
            "autoHeaderHeight": defaults.auto_header_height,
        });
        if let (Some(width), Some(obj)) = (defaults.initial_width, default_col.as_object_mut()) {
            obj.insert("initialWidth".into(), json!(width));
        }

        let mut options = json!({
            "columnDefs": columns.iter().map(|c| self.column_json(c)).collect::<Vec<_>>(),
            "rowData": rows,
            "defaultColDef": default_col,
            "animateRows": self.animate_rows,
            "enableCellTextSelection": self.enable_cell_text_selection,
            "ensureDomOrder": self.ensure_dom_order,
        });

        if let Some(obj) = options.as_object_mut() {
            if let Some(selection) = self.row_selection {
                let mode = match selection {
                    RowSelection::Single => "single",
                };
                obj.insert("rowSelection".into(), json!(mode));
            }
            if self.sizing == ColumnSizing::ResponsiveSizeToFit {
                obj.insert("autoSizeStrategy".into(), json!({ "type": "fitGridWidth" }));
            }
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::columns::CellStyle;

    #[test]
    fn test_calendar_columns_flex() {
        let def = ColumnDef {
            style: Some(CellStyle { color: "#CCF381" }),
            ..ColumnDef::new("Amount", false)
        };

        let col = GridOptions::calendar().column_json(&def);
        assert_eq!(
            col,
            json!({
                "headerName": "Amount",
                "field": "Amount",
                "flex": 1,
                "cellStyle": { "color": "#CCF381" },
            })
        );
    }

    #[test]
    fn test_master_options() {
        let options = GridOptions::master();
        let json = options.to_json(&[ColumnDef::new("YTW", true)], &[]);

        assert_eq!(json["columnDefs"][0]["type"], "numericColumn");
        assert!(json["columnDefs"][0].get("flex").is_none());
        assert_eq!(json["defaultColDef"]["filter"], "agMultiColumnFilter");
        assert_eq!(json["defaultColDef"]["initialWidth"], 200);
        assert_eq!(
            json["defaultColDef"]["filterParams"]["buttons"],
            json!(["apply", "reset"])
        );
        assert_eq!(json["rowSelection"], "single");
        assert_eq!(json["autoSizeStrategy"]["type"], "fitGridWidth");
    }

    #[test]
    fn test_calendar_options_omit_selection() {
        let json = GridOptions::calendar().to_json(&[], &[]);

        assert_eq!(json["defaultColDef"]["filter"], true);
        assert!(json.get("rowSelection").is_none());
        assert!(json["defaultColDef"].get("initialWidth").is_none());
    }
}
