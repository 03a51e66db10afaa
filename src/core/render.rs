use crate::domain::model::Service;
use crate::utils::error::Result;
use std::fmt::Write;

pub const LABEL_WIDTH: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Plain,
    Json,
    /// Output of a field selection: bare values when there is only one thing to show.
    /// `columns` is how many output columns the selection covers.
    Filtered { columns: usize },
}

pub fn render(services: &[Service], mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Plain => Ok(render_plain(services)),
        OutputMode::Json => render_json(services),
        OutputMode::Filtered { columns } => Ok(render_filtered(services, columns)),
    }
}

pub fn render_json(services: &[Service]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(services)?;
    json.push('\n');
    Ok(json)
}

pub fn render_plain(services: &[Service]) -> String {
    let mut out = String::new();
    for service in services {
        push_key_val(&mut out, "port", &service.port);
        push_key_val(&mut out, "description", &service.description);
        push_key_val(&mut out, "protocol", service.protocol());
        push_key_val(&mut out, "status", &service.status);
        out.push('\n');
    }
    out
}

/// 多筆且選了多個欄時改用一般格式，否則每行只印值。
/// 依選取的欄位判斷，某筆剛好有空欄位也不會讓後面的記錄變成多行。
pub fn render_filtered(services: &[Service], columns: usize) -> String {
    let multi_field = columns > 1
        || services
            .first()
            .is_some_and(|first| first.populated_values().len() > 1);

    if services.len() > 1 && multi_field {
        return render_plain(services);
    }

    let mut out = String::new();
    for service in services {
        let values = service.populated_values();
        if values.is_empty() {
            out.push('\n');
        }
        for value in values {
            out.push_str(value);
            out.push('\n');
        }
    }
    out
}

fn push_key_val(out: &mut String, key: &str, val: &str) {
    if val.is_empty() {
        return;
    }
    // String 的 fmt::Write 不會失敗
    let _ = writeln!(out, "{:<width$}: {}", key, val, width = LABEL_WIDTH);
}
