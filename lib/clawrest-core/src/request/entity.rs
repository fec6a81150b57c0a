use headers::ContentType;

/// A transport-ready request body with its content type.
#[derive(Clone, PartialEq, derive_more::Debug)]
pub struct Entity {
    content_type: ContentType,
    #[debug(ignore)]
    data: Vec<u8>,
}

impl Entity {
    /// A JSON entity, `application/json`.
    pub fn json(json: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::json(),
            data: json.into().into_bytes(),
        }
    }

    /// The content type of the entity.
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// The raw bytes of the entity.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the entity, returning its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
