//! Integration tests for analysis and chat fallback behavior.

#[cfg(test)]
mod tests {
    /// Test edital analysis without credentials returns the offline fallback.
    #[test]
    fn test_edital_analysis_fallback_without_credentials() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server without OPENAI_API_KEY
        // 2. POST /api/analysis/edital {edital_content, company_data}
        // 3. Assert 500 with a non-empty fallback_analysis
        // 4. Assert the fallback mentions "Revise manualmente o edital"
        //    and the edital character count
    }

    /// Test recurso drafting saves a document even on the fallback path.
    #[test]
    fn test_recurso_fallback_still_persists() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server without OPENAI_API_KEY
        // 2. Create a case
        // 3. POST /api/analysis/recurso {motivo, fundamentacao, case_id}
        // 4. Assert 200 with recurso.document_type == "recurso", status "Rascunho"
        // 5. Assert the document exists via GET /api/documents/{id}
    }

    /// Test recurso with an unknown case returns 404 and persists nothing.
    #[test]
    fn test_recurso_unknown_case() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. POST /api/analysis/recurso {motivo, fundamentacao, case_id: 9999}
        // 2. Assert 404 NOT_FOUND
        // 3. Assert GET /api/documents returns no new documents
    }

    /// Test chat without a key degrades with fallback_response populated.
    #[test]
    fn test_chat_fallback_without_key() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server without OPENAI_API_KEY
        // 2. POST /api/chat {message: "Olá"}
        // 3. Assert 500 with a non-empty fallback_response
    }
}
