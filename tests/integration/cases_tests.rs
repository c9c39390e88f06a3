//! Integration tests for case CRUD, search and stats.
//!
//! Tests GET/POST/PUT/DELETE /api/cases and related endpoints.

#[cfg(test)]
mod tests {
    /// Test creating a case applies the documented defaults.
    #[test]
    fn test_create_case_applies_defaults() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server with fresh database
        // 2. POST /api/cases {number: "001/2024", title: "Pregão X"}
        // 3. Assert 201 Created
        // 4. Assert case.status == "Em Andamento" and case.priority == "Média"
        // 5. Assert created_at == updated_at
    }

    /// Test duplicate business number returns 409 and leaves the store unchanged.
    #[test]
    fn test_create_case_duplicate_number_conflicts() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. POST /api/cases {number: "001/2024", title: "Pregão X"} -> 201
        // 2. POST /api/cases with the same number -> 409 CONFLICT
        // 3. GET /api/cases?search=001/2024
        // 4. Assert exactly one case with that number exists
    }

    /// Test partial update leaves absent fields unchanged and bumps updated_at.
    #[test]
    fn test_update_case_is_partial() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Create a case with description and organ set
        // 2. PUT /api/cases/{id} {priority: "Alta"}
        // 3. Assert description and organ are unchanged
        // 4. Assert updated_at > created_at
    }

    /// Test deleting a case cascades to its documents.
    #[test]
    fn test_delete_case_cascades_to_documents() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Create a case and two documents attached to it
        // 2. DELETE /api/cases/{id} -> 200
        // 3. GET /api/documents/{doc_id} -> 404 for both documents
    }

    /// Test stats on an empty store returns zeros without dividing by zero.
    #[test]
    fn test_stats_empty_store() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server with fresh database
        // 2. GET /api/cases/stats
        // 3. Assert all counts are 0 and completion_rate == 0.0
    }

    /// Test list pagination metadata.
    #[test]
    fn test_list_cases_pagination() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Create 25 cases
        // 2. GET /api/cases?page=1&per_page=10
        // 3. Assert 10 cases returned, pagination.total == 25, pages == 3
        // 4. Assert newest case comes first
    }

    /// Test search requires a term.
    #[test]
    fn test_search_without_term_is_rejected() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. GET /api/cases/search (no q parameter)
        // 2. Assert 400 INVALID_INPUT
    }
}
