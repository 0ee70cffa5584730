//! Ordered multipart payload used to create bills.

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

/// A file picked in the attachment input
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Lowercased substring from the last '.', or `None` when there is no dot
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|index| file_name[index..].to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(Attachment),
}

/// Form fields in insertion order, like a browser `FormData`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: &str, value: impl ToString) {
        self.entries
            .push((name.to_string(), FormValue::Text(value.to_string())));
    }

    pub fn append_file(&mut self, name: &str, file: Attachment) {
        self.entries.push((name.to_string(), FormValue::File(file)));
    }

    /// First value appended under `name`
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FormValue::Text(text) => Some(text),
            FormValue::File(_) => None,
        }
    }

    pub fn get_file(&self, name: &str) -> Option<&Attachment> {
        match self.get(name)? {
            FormValue::File(file) => Some(file),
            FormValue::Text(_) => None,
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Build a multipart body, keeping field order
    pub fn to_multipart(&self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in &self.entries {
            form = match value {
                FormValue::Text(text) => form.text(name.clone(), text.clone()),
                FormValue::File(file) => {
                    let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
                    let part = match &file.content_type {
                        Some(content_type) => part.mime_str(content_type)?,
                        None => part,
                    };
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }

    /// JSON object of the text fields; files are skipped
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.entries {
            if let FormValue::Text(text) = value {
                object
                    .entry(name.clone())
                    .or_insert_with(|| Value::String(text.clone()));
            }
        }
        Value::Object(object)
    }
}
