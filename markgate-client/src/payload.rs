//! Request body construction for document submission

use serde::Serialize;

use crate::document::Document;
use crate::error::Result;

/// Document format accepted by the create endpoint.
const DOCUMENT_FORMAT: &str = "MANUAL";

/// Document type for introducing goods into circulation.
const DOCUMENT_TYPE: &str = "LP_INTRODUCE_GOODS";

/// Wire body of a create-document request.
///
/// The document itself travels as a JSON string inside the outer JSON body;
/// that nested encoding is what the registry's create endpoint expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    document_format: String,
    product_document: String,
    product_group: String,
    signature: String,
    #[serde(rename = "type")]
    doc_type: String,
}

impl SubmissionPayload {
    /// Serialize `document` and wrap it in the submission envelope.
    pub fn build(document: &Document, product_group: &str, signature: &str) -> Result<Self> {
        let product_document = serde_json::to_string(document)?;

        Ok(SubmissionPayload {
            document_format: DOCUMENT_FORMAT.to_string(),
            product_document,
            product_group: product_group.to_string(),
            signature: signature.to_string(),
            doc_type: DOCUMENT_TYPE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_fixed_format_and_type() {
        let payload = SubmissionPayload::build(&Document::default(), "shoes", "sig").unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["documentFormat"], "MANUAL");
        assert_eq!(value["type"], "LP_INTRODUCE_GOODS");
        assert_eq!(value["productGroup"], "shoes");
        assert_eq!(value["signature"], "sig");
    }

    #[test]
    fn document_is_nested_as_a_json_string() {
        let document = Document {
            doc_id: "doc-42".into(),
            ..Document::default()
        };
        let payload = SubmissionPayload::build(&document, "milk", "sig").unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        let inner = value["productDocument"]
            .as_str()
            .expect("productDocument must be a string");
        let parsed: serde_json::Value = serde_json::from_str(inner).unwrap();
        assert_eq!(parsed["docId"], "doc-42");
    }
}
