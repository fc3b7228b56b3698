use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DocumentCreate {
    pub title: String,
    pub content: String,
    pub file_url: Option<String>,
}
