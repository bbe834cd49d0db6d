use std::fmt::Write;

use staff_biodata_core::domain::biodata::csv_export::CSV_FILE_NAME;
use staff_biodata_core::domain::biodata::{Gender, RecordTable};
use strum::IntoEnumIterator;

pub const TITLE: &str = "EduRepublic Staff Biodata Collection";

pub const SETUP_STEPS: [&str; 6] = [
    "Create a Google Cloud project",
    "Enable Google Sheets API",
    "Create a service account",
    "For deployment: set sheets.service_account_credentials and sheets.spreadsheet_id in the configuration (or STAFF_BIODATA__SHEETS__* environment variables)",
    "For local development: download the JSON key file as 'service_account_key.json'",
    "Share your Google Sheet with the service account email",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Saved,
    SaveFailed { message: String, configuration: bool },
}

/// Everything one render of the page needs.
#[derive(Debug)]
pub struct PageView {
    pub banner: Option<Banner>,
    pub unconfigured: bool,
    /// The read-back table, or the message explaining why it could not be read.
    pub table: Result<RecordTable, String>,
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render(view: &PageView) -> String {
    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write_page(&mut html, view);
    html
}

fn write_page(html: &mut String, view: &PageView) -> std::fmt::Result {
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\"><head><meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{}</title>", escape(TITLE))?;
    writeln!(
        html,
        "<style>body{{font-family:sans-serif;max-width:60rem;margin:2rem auto}}\
         .success{{color:#1b5e20}}.error{{color:#b71c1c}}.warning{{color:#e65100}}\
         label{{display:block;margin-top:.6rem}}table{{border-collapse:collapse}}\
         td,th{{border:1px solid #ccc;padding:.2rem .5rem}}</style>"
    )?;
    writeln!(html, "</head><body>")?;
    writeln!(html, "<h1>{}</h1>", escape(TITLE))?;

    if view.unconfigured {
        writeln!(html, "<p class=\"warning\">⚠️ Google Sheets not configured</p>")?;
        write_setup_steps(html, "To use Google Sheets integration:")?;
    }

    if let Some(banner) = &view.banner {
        write_banner(html, banner)?;
    }

    write_form(html)?;
    write_table_section(html, &view.table)?;

    writeln!(html, "</body></html>")
}

fn write_setup_steps(html: &mut String, heading: &str) -> std::fmt::Result {
    writeln!(html, "<div class=\"info\"><p>{}</p><ol>", escape(heading))?;
    for step in SETUP_STEPS {
        writeln!(html, "<li>{}</li>", escape(step))?;
    }
    writeln!(html, "</ol></div>")
}

fn write_banner(html: &mut String, banner: &Banner) -> std::fmt::Result {
    match banner {
        Banner::Saved => writeln!(
            html,
            "<p class=\"success\">✅ Biodata saved successfully to Google Sheets!</p>"
        ),
        Banner::SaveFailed {
            message,
            configuration,
        } => {
            writeln!(html, "<p class=\"error\">❌ {}</p>", escape(message))?;
            writeln!(
                html,
                "<p class=\"error\">❌ Failed to save biodata. Please check your Google Sheets configuration.</p>"
            )?;
            if *configuration {
                write_setup_steps(html, "Please create a Google Cloud service account and provide its key:")?;
            }
            Ok(())
        }
    }
}

fn write_text_input(
    html: &mut String,
    label: &str,
    name: &str,
    input_type: &str,
    required: bool,
) -> std::fmt::Result {
    writeln!(
        html,
        "<label>{label}<br><input type=\"{input_type}\" name=\"{name}\"{required}></label>",
        label = escape(label),
        required = if required { " required" } else { "" },
    )
}

fn write_form(html: &mut String) -> std::fmt::Result {
    writeln!(html, "<form method=\"post\" action=\"/\">")?;
    writeln!(html, "<h2>Enter Staff Information</h2>")?;

    write_text_input(html, "Full Name", "full_name", "text", true)?;
    write_text_input(html, "Phone Number", "phone", "tel", true)?;
    write_text_input(html, "Email Address", "email", "email", true)?;
    writeln!(
        html,
        "<label>Home Address<br><textarea name=\"address\" rows=\"3\" cols=\"50\"></textarea></label>"
    )?;
    write_text_input(html, "Date of Birth", "date_of_birth", "date", true)?;

    writeln!(html, "<label>Gender<br><select name=\"gender\" required>")?;
    for gender in Gender::iter() {
        writeln!(html, "<option value=\"{0}\">{0}</option>", gender)?;
    }
    writeln!(html, "</select></label>")?;

    write_text_input(html, "Department / Role", "department", "text", true)?;
    write_text_input(html, "Date Joined", "date_joined", "date", true)?;

    writeln!(html, "<hr><h2>Emergency Contact Details</h2>")?;
    write_text_input(html, "Emergency Contact Name", "emergency_name", "text", false)?;
    write_text_input(html, "Emergency Contact Phone", "emergency_phone", "tel", false)?;
    write_text_input(html, "Relationship to Staff", "emergency_relation", "text", false)?;

    writeln!(html, "<p><button type=\"submit\">Submit Biodata</button></p>")?;
    writeln!(html, "</form>")
}

fn write_table_section(html: &mut String, table: &Result<RecordTable, String>) -> std::fmt::Result {
    writeln!(html, "<h2>📄 Submitted Biodata</h2>")?;

    let table = match table {
        Ok(table) if !table.is_empty() => table,
        Ok(_) => {
            return writeln!(
                html,
                "<p class=\"info\">No data available or Google Sheets not configured.</p>"
            );
        }
        Err(message) => {
            writeln!(
                html,
                "<p class=\"error\">❌ Error reading from Google Sheets: {}</p>",
                escape(message)
            )?;
            return writeln!(
                html,
                "<p class=\"info\">No data available or Google Sheets not configured.</p>"
            );
        }
    };

    writeln!(html, "<table><thead><tr>")?;
    for header in table.headers() {
        write!(html, "<th>{}</th>", escape(header))?;
    }
    writeln!(html, "</tr></thead><tbody>")?;
    for row in table.rows() {
        write!(html, "<tr>")?;
        for cell in row {
            write!(html, "<td>{}</td>", escape(cell))?;
        }
        writeln!(html, "</tr>")?;
    }
    writeln!(html, "</tbody></table>")?;

    writeln!(
        html,
        "<p><a href=\"/download.csv\" download=\"{}\">Download as CSV (Backup)</a></p>",
        CSV_FILE_NAME
    )
}
