//! Human-readable extraction report.
//!
//! Lists document information, then for each page its section label and
//! every value that was found. Absent values are left out.

use crate::model::{DocumentRecord, FieldMap, PageRecord};

const RULE_WIDTH: usize = 60;

/// Render a plain text report of what was extracted.
pub fn to_summary(doc: &DocumentRecord) -> String {
    let mut output = String::new();
    let meta = &doc.document;

    heading(&mut output, "DOCUMENT INFORMATION");
    line(&mut output, 0, "File", &meta.file_name);
    line(&mut output, 0, "Type", meta.document_type.as_deref().unwrap_or("-"));
    line(&mut output, 0, "Total Pages", &meta.total_pages.to_string());
    if let Some(declared) = meta.declared_total_pages {
        line(&mut output, 0, "Declared Pages", &declared.to_string());
    }
    line(&mut output, 0, "Envelope ID", meta.envelope_id.as_deref().unwrap_or("-"));
    line(&mut output, 0, "Extracted", &meta.extracted_at.to_rfc3339());

    for page in &doc.pages {
        output.push('\n');
        render_page(&mut output, page);
    }

    output
}

fn render_page(output: &mut String, page: &PageRecord) {
    heading(output, &format!("PAGE {}: {}", page.number, page.section));

    if !page.has_payload() {
        output.push_str("  (no structured data)\n");
        return;
    }

    if let Some(fields) = &page.form_fields {
        present_fields(output, 1, fields);
    }

    if let Some(signatures) = &page.signatures {
        if signatures.present_count() > 0 {
            output.push_str("  Signatures:\n");
            present_fields(output, 2, signatures);
        }
    }

    if let Some(tables) = &page.tables {
        for (name, rows) in tables.iter() {
            if rows.is_empty() {
                output.push_str(&format!("  {}: no items found\n", name));
                continue;
            }
            for (i, row) in rows.iter().enumerate() {
                output.push_str(&format!("  {} item {}:\n", name, i + 1));
                present_fields(output, 2, row);
            }
        }
    }
}

fn present_fields(output: &mut String, depth: usize, fields: &FieldMap) {
    for (key, value) in fields.iter() {
        if let Some(value) = value {
            line(output, depth, key, value);
        }
    }
}

fn heading(output: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    output.push_str(&rule);
    output.push('\n');
    output.push_str(title);
    output.push('\n');
    output.push_str(&rule);
    output.push('\n');
}

fn line(output: &mut String, depth: usize, key: &str, value: &str) {
    output.push_str(&"  ".repeat(depth));
    output.push_str(key);
    output.push_str(": ");
    output.push_str(value);
    output.push('\n');
}
