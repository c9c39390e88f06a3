//! Integration tests for document CRUD and export.

#[cfg(test)]
mod tests {
    /// Test creating a document under a missing case returns 404.
    #[test]
    fn test_create_document_unknown_case() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. POST /api/documents {title, document_type: "recurso", case_id: 9999}
        // 2. Assert 404 NOT_FOUND
    }

    /// Test document update is limited to title/content/status.
    #[test]
    fn test_update_document_limited_fields() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Create a case and a document
        // 2. PUT /api/documents/{id} {content: "novo", document_type: "edital"}
        // 3. Assert content changed and document_type did not
    }

    /// Test Google Docs export without configuration is an honest error.
    #[test]
    fn test_google_docs_export_not_configured() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server without GOOGLE_DOCS_ACCESS_TOKEN
        // 2. POST /api/documents/google-docs/create {title, content}
        // 3. Assert 500 UNAVAILABLE with a pt-BR message
        // 4. Assert no fabricated document id in the body
    }

    /// Test report generation persists a relatorio document.
    #[test]
    fn test_generate_report_persists_document() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Create a case with two documents
        // 2. POST /api/documents/generate-report {case_id}
        // 3. Assert 200 with report.document_type == "relatorio"
        // 4. Assert GET /api/documents?case_id now returns three documents
    }
}
