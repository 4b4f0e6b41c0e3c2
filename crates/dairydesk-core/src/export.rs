// ── Client data export ──
//
// CSV/JSON rendering of the cache with a fixed column order. Reads the
// snapshot without mutating it; file download is the embedder's job.

use chrono::{DateTime, Utc};

use crate::model::Client;

/// Fixed CSV column order.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "Name",
    "Mobile",
    "Email",
    "Admin Link",
    "Firebase Email/ID",
    "Status",
    "Created At",
    "Updated At",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

/// A rendered export, ready for the embedder's download path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Render `clients` in the requested format. `now` stamps the suggested
/// file name (`clients_YYYY-MM-DD.csv`).
pub fn export_clients(
    clients: &[Client],
    format: ExportFormat,
    now: DateTime<Utc>,
) -> ExportFile {
    let content = match format {
        ExportFormat::Csv => to_csv(clients),
        ExportFormat::Json => to_json(clients),
    };
    ExportFile {
        file_name: format!("clients_{}.{}", now.format("%Y-%m-%d"), format.extension()),
        mime_type: format.mime_type(),
        content,
    }
}

fn to_csv(clients: &[Client]) -> String {
    let mut lines = Vec::with_capacity(clients.len() + 1);
    lines.push(EXPORT_COLUMNS.join(","));

    for client in clients {
        let row = [
            escape_csv(&client.name),
            escape_csv(&client.mobile),
            escape_csv(&client.email),
            escape_csv(client.admin_link.as_deref().unwrap_or("")),
            escape_csv(client.firebase_email.as_deref().unwrap_or("")),
            escape_csv(&client.status.to_string()),
            escape_csv(&client.created_at.to_rfc3339()),
            escape_csv(&client.updated_at.to_rfc3339()),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Quote when the value contains a comma, quote, or newline; double any
/// embedded quotes.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

fn to_json(clients: &[Client]) -> String {
    serde_json::to_string_pretty(clients).expect("client records always serialize")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ClientId, ClientStatus};
    use chrono::TimeZone;

    fn sample() -> Client {
        Client {
            id: ClientId::new("c1"),
            name: "Asha Dairy, Pune".into(),
            mobile: "+911234567890".into(),
            email: "asha@dairy.example".into(),
            admin_link: None,
            firebase_email: Some("asha-fb".into()),
            status: ClientStatus::Active,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 2, 11, 30, 0).unwrap(),
        }
    }

    #[test]
    fn csv_header_uses_the_fixed_column_order() {
        let file = export_clients(&[], ExportFormat::Csv, Utc::now());
        assert_eq!(
            file.content,
            "Name,Mobile,Email,Admin Link,Firebase Email/ID,Status,Created At,Updated At"
        );
    }

    #[test]
    fn csv_quotes_embedded_commas_and_doubles_quotes() {
        assert_eq!(escape_csv("Asha Dairy, Pune"), "\"Asha Dairy, Pune\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("plain"), "plain");
    }

    #[test]
    fn csv_rows_render_blank_optionals_and_rfc3339_timestamps() {
        let file = export_clients(&[sample()], ExportFormat::Csv, Utc::now());
        let row = file.content.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"Asha Dairy, Pune\",+911234567890,asha@dairy.example,,asha-fb,active,\
             2024-05-01T10:00:00+00:00,2024-05-02T11:30:00+00:00"
        );
    }

    #[test]
    fn json_export_is_the_raw_record_array() {
        let file = export_clients(&[sample()], ExportFormat::Json, Utc::now());
        let parsed: serde_json::Value = serde_json::from_str(&file.content).unwrap();
        assert_eq!(parsed[0]["name"], "Asha Dairy, Pune");
        assert_eq!(parsed[0]["firebaseEmail"], "asha-fb");
        assert_eq!(parsed[0]["status"], "active");
    }

    #[test]
    fn file_names_carry_the_date_and_extension() {
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap();
        assert_eq!(
            export_clients(&[], ExportFormat::Csv, now).file_name,
            "clients_2024-05-03.csv"
        );
        assert_eq!(
            export_clients(&[], ExportFormat::Json, now).file_name,
            "clients_2024-05-03.json"
        );
    }
}
