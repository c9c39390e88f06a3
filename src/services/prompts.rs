//! Prompt composition for the completion adapter and deterministic offline
//! fallback templates.
//!
//! Everything in this module is pure string formatting: the fallback paths
//! must always succeed so the API can answer even when the external AI
//! service is unreachable or unauthenticated.

use crate::entity::case;

/// Maximum company-data excerpt embedded in the fallback analysis.
const COMPANY_DATA_EXCERPT_LEN: usize = 200;

/// System instruction for edital analysis.
pub const EDITAL_ANALYSIS_PROMPT: &str = "\
Você é um especialista em análise de editais de licitação pública brasileira.
Analise o edital fornecido e identifique:

1. **Vícios e Irregularidades:**
   - Cláusulas restritivas à competitividade
   - Exigências desproporcionais ou desnecessárias
   - Violações à Lei 14.133/2021
   - Critérios de julgamento inadequados

2. **Oportunidades de Impugnação:**
   - Pontos passíveis de questionamento
   - Fundamentação jurídica para recursos
   - Artigos da lei aplicáveis

3. **Estratégias Recomendadas:**
   - Abordagem para participação
   - Documentação necessária
   - Prazos importantes

4. **Riscos Identificados:**
   - Aspectos que podem prejudicar a participação
   - Cláusulas ambíguas ou problemáticas

Forneça uma análise detalhada, fundamentada na legislação brasileira.";

/// Default persona for the chat endpoint.
pub const DEFAULT_ASSISTANT_PROMPT: &str = "\
Você é Harvey, um assistente jurídico especializado em licitações públicas brasileiras,
baseado na Lei nº 14.133/2021. Você auxilia advogados e empresas na elaboração de recursos,
contrarrazões e análise de editais de licitação.

Suas especialidades incluem:
- Análise de editais de licitação
- Elaboração de recursos administrativos
- Redação de contrarrazões
- Interpretação da Lei 14.133/2021
- Orientações sobre procedimentos licitatórios
- Identificação de vícios em editais
- Sugestões de estratégias jurídicas

Sempre forneça respostas precisas, fundamentadas na legislação brasileira e com linguagem
jurídica apropriada. Quando necessário, cite artigos específicos da lei.";

/// User message for the edital analysis completion call.
pub fn edital_user_prompt(company_data: &str, edital_content: &str) -> String {
    format!(
        "Dados da empresa: {}\n\nEdital: {}",
        company_data, edital_content
    )
}

/// Instruction for drafting an administrative appeal with the completion adapter.
pub fn recurso_prompt(case: &case::Model, motivo: &str, fundamentacao: &str) -> String {
    format!(
        "\
Elabore um recurso administrativo formal para licitação pública brasileira com base nos seguintes dados:

**Caso:** {title}
**Número:** {number}
**Órgão:** {organ}
**Motivo do Recurso:** {motivo}
**Fundamentação:** {fundamentacao}

O recurso deve:
1. Seguir a estrutura formal exigida
2. Citar artigos relevantes da Lei 14.133/2021
3. Apresentar argumentação jurídica sólida
4. Incluir pedidos específicos
5. Respeitar linguagem jurídica apropriada

Estruture o documento com:
- Cabeçalho
- Identificação das partes
- Dos fatos
- Do direito
- Dos pedidos
- Fecho",
        title = case.title,
        number = case.number,
        organ = case.organ.as_deref().unwrap_or("[ÓRGÃO RESPONSÁVEL]"),
        motivo = motivo,
        fundamentacao = fundamentacao,
    )
}

/// Truncate to at most `max` characters on a char boundary, appending an
/// ellipsis marker when anything was cut.
fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut)
}

/// Offline analysis used whenever the completion adapter is unavailable.
///
/// Always returns non-empty text embedding the character count of the edital
/// and a bounded excerpt of the company data.
pub fn fallback_analysis(edital_content: &str, company_data: &str) -> String {
    format!(
        "\
# Análise Básica do Edital

## Resumo
Esta é uma análise básica gerada automaticamente. Para uma análise completa com IA, configure a API key do serviço de completions.

## Pontos de Atenção Gerais
1. **Verificar Habilitação Jurídica:**
   - Certidão de regularidade fiscal
   - Certidão trabalhista
   - Certidão municipal

2. **Qualificação Técnica:**
   - Atestados de capacidade técnica
   - Registro no órgão competente
   - Experiência mínima exigida

3. **Qualificação Econômico-Financeira:**
   - Balanço patrimonial
   - Certidão negativa de falência
   - Índices de liquidez

## Recomendações
- Revisar todos os anexos do edital
- Verificar prazos de entrega
- Analisar critérios de julgamento
- Confirmar local de entrega das propostas

## Próximos Passos
1. Configure a API key para análise detalhada
2. Revise manualmente o edital
3. Consulte especialista jurídico se necessário

**Dados da empresa considerados:** {company}
**Conteúdo do edital:** {chars} caracteres analisados.",
        company = excerpt(company_data, COMPANY_DATA_EXCERPT_LEN),
        chars = edital_content.chars().count(),
    )
}

/// Offline administrative-appeal skeleton.
pub fn fallback_recurso(case: &case::Model, motivo: &str, fundamentacao: &str) -> String {
    format!(
        "\
RECURSO ADMINISTRATIVO

Ao(À) {organ}

PROCESSO: {number}
OBJETO: {title}

[NOME DA EMPRESA], pessoa jurídica de direito privado, inscrita no CNPJ sob o nº [CNPJ], com sede na [ENDEREÇO], vem, respeitosamente, perante Vossa Senhoria, interpor o presente

RECURSO ADMINISTRATIVO

contra [ESPECIFICAR ATO RECORRIDO], com fundamento no art. 164 da Lei nº 14.133/2021, pelas razões de fato e de direito a seguir expostas:

I - DOS FATOS

{motivo}

II - DO DIREITO

{fundamentacao}

A Lei nº 14.133/2021, em seu artigo 164, assegura o direito de recurso aos interessados que se sintam prejudicados por atos da Administração no curso do procedimento licitatório.

III - DOS PEDIDOS

Diante do exposto, requer-se:

a) O recebimento e processamento do presente recurso;
b) A reconsideração da decisão recorrida;
c) [PEDIDOS ESPECÍFICOS CONFORME O CASO]

Termos em que pede deferimento.

[LOCAL], [DATA]

[NOME DO RESPONSÁVEL]
[CARGO]
[EMPRESA]",
        organ = case.organ.as_deref().unwrap_or("[ÓRGÃO RESPONSÁVEL]"),
        number = case.number,
        title = case.title,
        motivo = motivo,
        fundamentacao = fundamentacao,
    )
}

/// Deterministic counter-argument ("contrarrazões") skeleton.
pub fn contrarrazao_text(
    case: &case::Model,
    recurso_adverso: &str,
    argumentos_defesa: &str,
) -> String {
    format!(
        "\
CONTRARRAZÕES

Ao(À) {organ}

PROCESSO: {number}
OBJETO: {title}

[NOME DA EMPRESA] vem, respeitosamente, apresentar CONTRARRAZÕES ao recurso interposto por [RECORRENTE], nos seguintes termos:

I - DO RECURSO ADVERSO

{recurso_adverso}

II - DAS CONTRARRAZÕES

{argumentos_defesa}

III - DO PEDIDO

Requer-se a manutenção da decisão recorrida, por estar em consonância com a legislação vigente e com os princípios que regem a Administração Pública.

[LOCAL], [DATA]

[NOME DO RESPONSÁVEL]
[CARGO]
[EMPRESA]",
        organ = case.organ.as_deref().unwrap_or("[ÓRGÃO RESPONSÁVEL]"),
        number = case.number,
        title = case.title,
        recurso_adverso = recurso_adverso,
        argumentos_defesa = argumentos_defesa,
    )
}

/// Markdown report over a case and its documents.
pub fn case_report(case: &case::Model, documents: &[crate::entity::document::Model]) -> String {
    let mut report = format!(
        "\
# Relatório do Caso: {title}

## Informações Gerais
- **Número:** {number}
- **Status:** {status}
- **Prioridade:** {priority}
- **Órgão:** {organ}
- **Modalidade:** {modality}

## Documentos Associados
Total de documentos: {count}
",
        title = case.title,
        number = case.number,
        status = case.status,
        priority = case.priority,
        organ = case.organ.as_deref().unwrap_or("Não informado"),
        modality = case.modality.as_deref().unwrap_or("Não informada"),
        count = documents.len(),
    );

    for doc in documents {
        report.push_str(&format!(
            "\n### {title}\n- **Tipo:** {doc_type}\n- **Status:** {status}\n- **Criado em:** {created}\n- **Atualizado em:** {updated}\n",
            title = doc.title,
            doc_type = doc.document_type,
            status = doc.status,
            created = doc.created_at.format("%d/%m/%Y %H:%M"),
            updated = doc.updated_at.format("%d/%m/%Y %H:%M"),
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_case() -> case::Model {
        let now = Utc::now();
        case::Model {
            id: 1,
            number: "001/2024".to_string(),
            title: "Pregão Eletrônico de TI".to_string(),
            description: None,
            status: "Em Andamento".to_string(),
            priority: "Média".to_string(),
            organ: Some("Prefeitura Municipal".to_string()),
            modality: Some("Pregão".to_string()),
            object_description: None,
            estimated_value: None,
            deadline: None,
            created_at: now,
            updated_at: now,
            user_id: None,
        }
    }

    #[test]
    fn test_fallback_analysis_reports_edital_char_count() {
        let edital = "Edital de pregão eletrônico nº 42";
        let text = fallback_analysis(edital, "Empresa X Ltda");
        assert!(!text.is_empty());
        assert!(text.contains(&format!("{} caracteres analisados", edital.chars().count())));
    }

    #[test]
    fn test_fallback_analysis_truncates_company_data() {
        let company = "x".repeat(500);
        let text = fallback_analysis("edital", &company);
        let excerpt = format!("{}...", "x".repeat(200));
        assert!(text.contains(&excerpt));
        assert!(!text.contains(&"x".repeat(201)));
    }

    #[test]
    fn test_fallback_analysis_short_company_data_is_untouched() {
        let text = fallback_analysis("edital", "Empresa X");
        assert!(text.contains("Empresa X"));
        assert!(!text.contains("Empresa X..."));
    }

    #[test]
    fn test_excerpt_respects_multibyte_boundaries() {
        // 300 two-byte chars; a byte-index cut at 200 would panic.
        let company = "ç".repeat(300);
        let text = fallback_analysis("edital", &company);
        assert!(text.contains(&format!("{}...", "ç".repeat(200))));
    }

    #[test]
    fn test_fallback_analysis_mentions_manual_review() {
        let text = fallback_analysis("", "");
        assert!(text.contains("Revise manualmente o edital"));
    }

    #[test]
    fn test_fallback_recurso_cites_statute_and_case() {
        let case = sample_case();
        let text = fallback_recurso(&case, "desclassificação indevida", "art. 59");
        assert!(text.contains("Lei nº 14.133/2021"));
        assert!(text.contains("001/2024"));
        assert!(text.contains("desclassificação indevida"));
        assert!(text.contains("Prefeitura Municipal"));
    }

    #[test]
    fn test_fallback_recurso_placeholder_when_organ_missing() {
        let mut case = sample_case();
        case.organ = None;
        let text = fallback_recurso(&case, "m", "f");
        assert!(text.contains("[ÓRGÃO RESPONSÁVEL]"));
    }

    #[test]
    fn test_contrarrazao_embeds_both_sides() {
        let case = sample_case();
        let text = contrarrazao_text(&case, "recurso do concorrente", "nossa defesa");
        assert!(text.contains("CONTRARRAZÕES"));
        assert!(text.contains("recurso do concorrente"));
        assert!(text.contains("nossa defesa"));
    }

    #[test]
    fn test_case_report_lists_documents() {
        let case = sample_case();
        let now = Utc::now();
        let docs = vec![crate::entity::document::Model {
            id: 7,
            title: "Recurso Administrativo".to_string(),
            content: None,
            document_type: "recurso".to_string(),
            status: "Rascunho".to_string(),
            external_doc_id: None,
            external_doc_url: None,
            case_id: 1,
            user_id: None,
            created_at: now,
            updated_at: now,
        }];
        let report = case_report(&case, &docs);
        assert!(report.contains("Total de documentos: 1"));
        assert!(report.contains("### Recurso Administrativo"));
        assert!(report.contains("**Tipo:** recurso"));
    }

    #[test]
    fn test_recurso_prompt_embeds_case_fields() {
        let case = sample_case();
        let prompt = recurso_prompt(&case, "motivo", "fundamentação");
        assert!(prompt.contains("**Número:** 001/2024"));
        assert!(prompt.contains("Dos pedidos"));
    }
}
