use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::DatasetError;
use crate::streams::Stream;
use crate::utils::file_parsing::{is_comment_or_blank, split_fields, split_leading_token};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

enum Column {
    Numeric,
    Nominal(Arc<NominalAttribute>),
}

/// Dense ARFF dataset held in memory.
///
/// The header is parsed eagerly; data rows are parsed as they are pulled so
/// that a bad row only costs that row.
pub struct ArffFileStream {
    header: Arc<InstanceHeader>,
    columns: Vec<Column>,
    rows: Vec<(usize, String)>,
    next: usize,
}

impl ArffFileStream {
    /// Opens the file at `path`. `class_index` defaults to the last attribute.
    pub fn new<P: AsRef<Path>>(path: P, class_index: Option<usize>) -> Result<Self, DatasetError> {
        let source = fs::read_to_string(path)?;
        Self::from_source(&source, class_index)
    }

    pub fn from_source(source: &str, class_index: Option<usize>) -> Result<Self, DatasetError> {
        let mut relation_name = String::new();
        let mut attributes: Vec<AttributeRef> = Vec::new();
        let mut columns = Vec::new();
        let mut rows = Vec::new();
        let mut in_data = false;

        for (i, raw) in source.lines().enumerate() {
            let line_no = i + 1;
            if is_comment_or_blank(raw) {
                continue;
            }
            let line = raw.trim();
            if in_data {
                rows.push((line_no, line.to_string()));
                continue;
            }

            let (keyword, rest) = match line.find(char::is_whitespace) {
                Some(end) => (&line[..end], line[end..].trim()),
                None => (line, ""),
            };
            match keyword.to_ascii_lowercase().as_str() {
                "@relation" => {
                    relation_name = split_leading_token(rest)
                        .map(|(name, _)| name.to_string())
                        .unwrap_or_default();
                }
                "@attribute" => {
                    let (attribute, column) = parse_attribute(rest, line_no)?;
                    attributes.push(attribute);
                    columns.push(column);
                }
                "@data" => in_data = true,
                other => {
                    return Err(DatasetError::Parse {
                        line: line_no,
                        message: format!("unexpected declaration {other}"),
                    });
                }
            }
        }

        if !in_data {
            return Err(DatasetError::MissingData);
        }
        if attributes.is_empty() {
            return Err(DatasetError::Parse {
                line: 0,
                message: "no attributes declared".into(),
            });
        }

        let class_index = class_index.unwrap_or(attributes.len() - 1);
        if class_index >= attributes.len() {
            return Err(DatasetError::InvalidClassIndex {
                index: class_index,
                attributes: attributes.len(),
            });
        }
        if !matches!(columns[class_index], Column::Nominal(_)) {
            return Err(DatasetError::NonNominalClass(attributes[class_index].name()));
        }

        let header = Arc::new(InstanceHeader::new(relation_name, attributes, class_index));
        Ok(Self {
            header,
            columns,
            rows,
            next: 0,
        })
    }

    pub fn header_arc(&self) -> Arc<InstanceHeader> {
        Arc::clone(&self.header)
    }

    /// Data rows in the source, including ones that will be skipped.
    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    fn parse_row(&self, line_no: usize, line: &str) -> Option<DenseInstance> {
        if line.starts_with('{') {
            warn!(line = line_no, "skipping sparse ARFF row");
            return None;
        }
        let fields = split_fields(line);
        if fields.len() != self.columns.len() {
            warn!(
                line = line_no,
                expected = self.columns.len(),
                found = fields.len(),
                "skipping row with wrong number of fields"
            );
            return None;
        }

        let mut values = Vec::with_capacity(fields.len());
        for (field, column) in fields.iter().zip(&self.columns) {
            if field == "?" {
                values.push(f64::NAN);
                continue;
            }
            let value = match column {
                Column::Numeric => field.parse::<f64>().ok(),
                Column::Nominal(attr) => attr.index_of_value(field).map(|i| i as f64),
            };
            match value {
                Some(v) => values.push(v),
                None => {
                    warn!(line = line_no, value = %field, "skipping row with unparseable value");
                    return None;
                }
            }
        }
        Some(DenseInstance::new(Arc::clone(&self.header), values, 1.0))
    }
}

fn parse_attribute(rest: &str, line_no: usize) -> Result<(AttributeRef, Column), DatasetError> {
    let parse_err = |message: String| DatasetError::Parse {
        line: line_no,
        message,
    };
    let (name, kind) =
        split_leading_token(rest).ok_or_else(|| parse_err("missing attribute name".into()))?;

    if let Some(body) = kind.strip_prefix('{') {
        let body = body
            .strip_suffix('}')
            .ok_or_else(|| parse_err(format!("unterminated label set for {name}")))?;
        let labels: Vec<String> = split_fields(body)
            .into_iter()
            .filter(|l| !l.is_empty())
            .collect();
        if labels.is_empty() {
            return Err(parse_err(format!("empty label set for {name}")));
        }
        let attr = Arc::new(NominalAttribute::from_labels(name.to_string(), labels));
        return Ok((attr.clone() as AttributeRef, Column::Nominal(attr)));
    }

    match kind.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok((
            Arc::new(NumericAttribute::new(name.to_string())) as AttributeRef,
            Column::Numeric,
        )),
        other => Err(parse_err(format!(
            "unsupported type {other:?} for attribute {name}"
        ))),
    }
}

impl Stream for ArffFileStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.next < self.rows.len()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        while self.next < self.rows.len() {
            let (line_no, line) = &self.rows[self.next];
            let parsed = self.parse_row(*line_no, line);
            self.next += 1;
            if let Some(instance) = parsed {
                return Some(Box::new(instance));
            }
        }
        None
    }
}
