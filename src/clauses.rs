//! # Legal Clause Reference Data
//!
//! The standard terms-and-conditions clauses rendered into contracts. This
//! is static reference data: loaded once, read-only, and reproduced verbatim
//! in the output. The renderer must not reformat or summarize it, including
//! the embedded legal citations.

use std::sync::OnceLock;

/// A titled block of legal paragraph text. Included only in contracts, in
/// the order the clauses are defined.
#[derive(Debug, Clone)]
pub struct LegalClause {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

static CLAUSES: OnceLock<Vec<LegalClause>> = OnceLock::new();

/// The eight standard clauses, in their fixed order.
pub fn standard_clauses() -> &'static [LegalClause] {
    CLAUSES.get_or_init(build_clauses)
}

fn clause(heading: &str, paragraphs: &[&str]) -> LegalClause {
    LegalClause {
        heading: heading.to_string(),
        paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
    }
}

fn build_clauses() -> Vec<LegalClause> {
    vec![
        clause(
            "1. OBJETO DO CONTRATO",
            &[
                "O presente contrato tem por objeto a prestação de serviços de hospedagem, desenvolvimento web, marketing digital e serviços correlatos, conforme especificado no anexo de serviços contratados.",
                "Os serviços serão executados de acordo com as especificações técnicas e prazos estabelecidos em comum acordo entre as partes, conforme disposto no art. 593 do Código Civil Brasileiro (Lei 10.406/2002).",
            ],
        ),
        clause(
            "2. OBRIGAÇÕES DA CONTRATADA (MARKET HOST)",
            &[
                "Executar os serviços contratados com qualidade e dentro dos prazos estabelecidos;",
                "Manter sigilo absoluto sobre todas as informações confidenciais do contratante;",
                "Fornecer suporte técnico durante o período de vigência do contrato;",
                "Realizar backups regulares quando aplicável aos serviços contratados;",
                "Comunicar imediatamente qualquer problema que possa afetar a execução dos serviços;",
                "Cumprir as obrigações estabelecidas no Marco Civil da Internet (Lei 12.965/2014) e na Lei Geral de Proteção de Dados (Lei 13.709/2018).",
            ],
        ),
        clause(
            "3. OBRIGAÇÕES DO CONTRATANTE",
            &[
                "Fornecer todas as informações necessárias para a execução dos serviços;",
                "Efetuar os pagamentos nas datas estabelecidas;",
                "Comunicar alterações de dados de contato;",
                "Colaborar com a Market Host fornecendo acesso aos sistemas quando necessário;",
                "Respeitar os direitos autorais e de propriedade intelectual conforme Lei 9.610/98 (Lei de Direitos Autorais);",
                "Cumprir as disposições do Código de Defesa do Consumidor (Lei 8.078/90) quando aplicável.",
            ],
        ),
        clause(
            "4. CONDIÇÕES DE PAGAMENTO",
            &[
                "Os valores dos serviços estão especificados no anexo financeiro deste contrato;",
                "O pagamento deverá ser efetuado conforme as condições estabelecidas;",
                "Em caso de atraso no pagamento, serão aplicados juros de mora de 1% ao mês, multa de 2% e correção monetária pelo IPCA, conforme art. 406 do Código Civil;",
                "A falta de pagamento por mais de 30 dias poderá resultar na suspensão dos serviços, após notificação prévia de 10 dias úteis.",
            ],
        ),
        clause(
            "5. PRAZO E VIGÊNCIA",
            &[
                "O presente contrato terá vigência conforme especificado no anexo de serviços;",
                "O contrato poderá ser renovado mediante acordo entre as partes;",
                "Qualquer das partes poderá rescindir o contrato mediante aviso prévio de 30 dias, conforme art. 599 do Código Civil;",
                "Em caso de rescisão por inadimplemento, aplicam-se as disposições dos arts. 475 e 476 do Código Civil.",
            ],
        ),
        clause(
            "6. PROPRIEDADE INTELECTUAL",
            &[
                "Os direitos autorais dos trabalhos desenvolvidos pela ER.IA são regidos pela Lei 9.610/98 (Lei de Direitos Autorais);",
                "O contratante terá direito de uso dos materiais desenvolvidos conforme especificado;",
                "É vedada a reprodução ou distribuição não autorizada dos materiais, sob pena das sanções previstas nos arts. 102 a 110 da Lei 9.610/98.",
            ],
        ),
        clause(
            "7. CONFIDENCIALIDADE",
            &[
                "Ambas as partes se comprometem a manter sigilo sobre informações confidenciais;",
                "As informações confidenciais não poderão ser divulgadas a terceiros;",
                "Esta cláusula permanecerá válida mesmo após o término do contrato;",
                "O descumprimento desta cláusula sujeitará o infrator às penalidades previstas na Lei Geral de Proteção de Dados (Lei 13.709/2018).",
            ],
        ),
        clause(
            "8. DISPOSIÇÕES GERAIS",
            &[
                "Este contrato é regido pelas leis brasileiras;",
                "Eventuais alterações deverão ser formalizadas por escrito;",
                "O foro competente para dirimir questões deste contrato é o da comarca da sede da ER.IA, conforme art. 100, IV, 'a' do Código de Processo Civil (Lei 13.105/2015);",
                "Aplicam-se subsidiariamente as disposições do Código Civil Brasileiro (Lei 10.406/2002) e demais legislações pertinentes.",
            ],
        ),
    ]
}
