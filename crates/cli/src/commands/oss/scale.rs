//! scale command - Print image-resize query templates
//!
//! The templates are appended to an object URL to have the bucket's image
//! processing resize the picture on the fly.

use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

struct Template {
    token: &'static str,
    /// Printed verbatim in human output; scripts match on these lines.
    description: &'static str,
    english: &'static str,
}

// The third description repeats the second one. It is kept as printed.
const TEMPLATES: [Template; 6] = [
    Template {
        token: "!<Scale>p",
        description: "指定图片的宽高为原图的 Scale%",
        english: "scale width and height to Scale% of the original",
    },
    Template {
        token: "!<Scale>px",
        description: "指定图片的宽为原图的 Scale%，高度不变",
        english: "scale width to Scale% of the original, height unchanged",
    },
    Template {
        token: "!x<Scale>p",
        description: "指定图片的宽为原图的 Scale%，高度不变",
        english: "scale height to Scale% of the original, width unchanged",
    },
    Template {
        token: "<Width>x",
        description: "指定目标图片宽度为 Width，高度等比缩放",
        english: "set width to Width, height scales proportionally",
    },
    Template {
        token: "x<Height>",
        description: "指定目标图片高度为 Height，宽度等比缩放",
        english: "set height to Height, width scales proportionally",
    },
    Template {
        token: "<Width>x<Height>!",
        description: "忽略原图宽高比例，指定图片宽度为 Width，高度为 Height，强行缩放图片，可能导致目标图片变形",
        english: "ignore the aspect ratio and force Width x Height, the image may be distorted",
    },
];

#[derive(Debug, Serialize)]
struct TemplateOutput {
    query: String,
    description: &'static str,
    description_en: &'static str,
}

fn query(token: &str) -> String {
    format!("?imageMogr2/thumbnail/{token}")
}

/// Human-readable template lines
pub(super) fn lines() -> Vec<String> {
    TEMPLATES
        .iter()
        .map(|t| format!("{} :{} kb", query(t.token), t.description))
        .collect()
}

/// Execute the scale command
pub fn execute(formatter: &Formatter) -> ExitCode {
    if formatter.is_json() {
        let templates: Vec<TemplateOutput> = TEMPLATES
            .iter()
            .map(|t| TemplateOutput {
                query: query(t.token),
                description: t.description,
                description_en: t.english,
            })
            .collect();
        formatter.json(&templates);
    } else {
        for line in lines() {
            formatter.println(&line);
        }
    }
    ExitCode::Success
}
