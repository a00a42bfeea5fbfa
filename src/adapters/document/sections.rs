//! Section builders of the Term of Reference template.
//!
//! Each builder is a pure function from the generation context to the
//! blocks of one part of the document. `SECTIONS` fixes their order.

use crate::domain::document::{Block, Column, HeadingLevel, Jurisdiction, Table, LAW_REFERENCE};
use crate::domain::foundation::{is_filled, single_line};
use crate::domain::request::ContractRequest;
use crate::ports::{GenerationOptions, TemplateVariant};

/// Printed in place of a blank object description.
pub const OBJECT_PLACEHOLDER: &str = "[INSERIR OBJETO SOLICITADO]";

/// Printed instead of the standard indicators when they are not requested.
pub const KPI_PLACEHOLDER: &str =
    "  - [Definir de 3 a 6 indicadores mensuráveis coerentes com o objeto]";

/// The six standard KPI/SLA indicators and their computation rule.
pub const STANDARD_KPIS: [(&str, &str); 6] = [
    (
        "Disponibilidade (%)",
        "(Horas disponíveis ÷ Horas previstas) × 100.",
    ),
    (
        "Tempo de resposta (h)",
        "tempo entre abertura e primeiro atendimento.",
    ),
    ("Tempo de solução (h)", "tempo entre abertura e solução."),
    (
        "Taxa de retrabalho (%)",
        "(Ocorrências retrabalhadas ÷ Total de ocorrências) × 100.",
    ),
    (
        "Conformidade amostral (%)",
        "(Itens conformes ÷ Itens amostrados) × 100.",
    ),
    (
        "Pontualidade em entregas (%)",
        "(Entregas pontuais ÷ Entregas totais) × 100.",
    ),
];

/// Title of the hybrid solution option.
pub const HYBRID_OPTION_TITLE: &str = "Opção C — Híbrida/Colaborativa";

const REQUIREMENTS: [&str; 12] = [
    "Conformidade técnica com as especificações e normas indicadas.",
    "Qualificação técnica mínima (atestados, equipes, certificações quando cabíveis).",
    "Prazos de entrega/execução (SLA, janelas de atendimento, tempo de resposta).",
    "Garantia (prazo, cobertura, substituição/recall quando aplicável).",
    "Assistência técnica/manutenção (preventiva e corretiva, tempos de restauração).",
    "Treinamento/capacitação de usuários/servidores, com material didático.",
    "Documentação técnica (manuais, catálogos, ART/RRT quando exigível).",
    "Segurança e conformidade regulatória (saúde, meio ambiente, LGPD quando pertinente).",
    "Logística e entrega (locais, horários, acondicionamento, rastreabilidade).",
    "Medição e aceitação (procedimentos, evidências, formulários).",
    "Sustentabilidade (eficiência energética, redução de resíduos, destinação final).",
    "Penalidades e garantias contratuais alinhadas à Lei nº 14.133/2021.",
];

const EXECUTION_CLAUSES: [&str; 14] = [
    "Execução fiel pelas partes, conforme cláusulas e Lei nº 14.133/2021; responsabilidade por inexecução total ou parcial.",
    "Execução conforme este TR, observando Edital e Instrumento Contratual após assinatura.",
    "Solicitação do objeto **de forma parcelada**, mediante **OS** e **NE**.",
    "Comprovação por **Nota Fiscal** da contratada, **ateste** por servidor competente, com **relatório circunstanciado** (ex.: livro de ponto, comprovantes de entrega/serviços).",
    "Responsabilidade integral da contratada pelos ônus de execução.",
    "Observância da **NAD (Nota de Autorização de Despesas)**.",
    "Comunicações formais **por escrito** (admitido meio eletrônico quando aplicável).",
    "Prestação **sob demanda** mediante OS/documento equivalente, com **prazos e quantidades** definidos.",
    "Plano de mobilização/desmobilização e cronograma físico‑financeiro (quando aplicável).",
    "Gestão e fiscalização contratual (gestor e fiscais; rotinas de reunião e reporte).",
    "Confidencialidade, proteção de dados e propriedade intelectual (quando pertinente).",
    "Subcontratação e equipe mínima (critérios e limites, quando admitido).",
    "Reposição de bens/partes e prazos de correção de não conformidades.",
    "Indicadores de desempenho vinculados à medição/aceite e sanções.",
];

/// Everything a section builder may look at.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub request: &'a ContractRequest,
    pub jurisdiction: &'a Jurisdiction,
    pub options: &'a GenerationOptions,
}

impl<'a> SectionContext<'a> {
    pub fn new(
        request: &'a ContractRequest,
        jurisdiction: &'a Jurisdiction,
        options: &'a GenerationOptions,
    ) -> Self {
        Self {
            request,
            jurisdiction,
            options,
        }
    }

    /// Bold object description, or the bold placeholder when blank.
    pub fn object_markup(&self) -> String {
        if self.request.has_object() {
            format!("**{}**", single_line(&self.request.object))
        } else {
            format!("**{}**", OBJECT_PLACEHOLDER)
        }
    }

    fn municipality(&self) -> &str {
        self.jurisdiction.municipality()
    }
}

/// A pure builder for one part of the document.
pub type SectionBuilder = fn(&SectionContext<'_>) -> Vec<Block>;

/// Builders in document order.
pub const SECTIONS: [SectionBuilder; 8] = [
    header,
    general_conditions,
    need_and_legal_basis,
    solution_description,
    requirements,
    execution_model,
    measurement_criteria,
    closing_note,
];

/// Title, municipality and date.
pub fn header(ctx: &SectionContext<'_>) -> Vec<Block> {
    vec![
        Block::heading(
            HeadingLevel::One,
            format!("TERMO DE REFERÊNCIA — {}", LAW_REFERENCE),
        ),
        Block::paragraph(format!("**Município:** {}  ", ctx.municipality())),
        Block::paragraph(format!("**Data:** {}", ctx.jurisdiction.formatted_date())),
        Block::Blank,
        Block::Rule,
        Block::Blank,
    ]
}

/// Section 1: opening clauses plus the summary block.
pub fn general_conditions(ctx: &SectionContext<'_>) -> Vec<Block> {
    let mut blocks = vec![Block::heading(
        HeadingLevel::Two,
        "1. DAS CONDIÇÕES GERAIS DA CONTRATAÇÃO",
    )];

    match ctx.options.variant {
        TemplateVariant::FreeText => blocks.extend(free_text_preamble(ctx)),
        TemplateVariant::UnitSelection => blocks.extend(numbered_preamble(ctx)),
    }

    blocks.push(Block::Blank);
    blocks.push(Block::paragraph("**Quadro-resumo do objeto:**"));
    blocks.extend(summary_entries(ctx.request, ctx.options.variant));
    blocks.push(Block::Blank);
    blocks
}

fn free_text_preamble(ctx: &SectionContext<'_>) -> Vec<Block> {
    let municipality = ctx.municipality();
    vec![
        Block::paragraph(format!(
            "O presente Termo de Referência tem por objeto {}, conforme especificações, \
             quantidades e condições estabelecidas neste documento, visando atender à \
             Prefeitura Municipal de {} e às suas Secretarias Municipais.",
            ctx.object_markup(),
            municipality
        )),
        Block::paragraph(
            "**Escopo e abrangência:** delimita o que está incluído e excluído, unidades \
             atendidas e cobertura territorial (urbana/rural).",
        ),
        Block::paragraph(format!(
            "**Base normativa e princípios:** {} (planejamento, eficiência, motivação, \
             legalidade) e, quando aplicável, Decreto Municipal nº 09/2024 ({}).",
            LAW_REFERENCE,
            municipality.replace('-', "/")
        )),
        Block::paragraph(
            "**Vigência e prazos de execução/entrega:** definidos neste TR e no instrumento \
             contratual.",
        ),
        Block::paragraph(
            "**Forma de fornecimento:** contínuo e/ou parcelado, sob demanda, com emissão de \
             Ordem de Serviço (OS) e Nota de Empenho (NE), quando aplicável.",
        ),
    ]
}

fn numbered_preamble(ctx: &SectionContext<'_>) -> Vec<Block> {
    vec![
        Block::paragraph(format!(
            "1.1 O presente Termo de Referência tem por objeto {}, em conformidade com as \
             especificações de descrição e quantidade detalhadamente elencadas neste \
             documento, amparada pelas disposições legais vigentes que regulam tal \
             procedimento, visando atender as necessidades da Prefeitura Municipal de {} e \
             de suas Secretarias Municipais.",
            ctx.object_markup(),
            ctx.municipality()
        )),
        Block::paragraph(
            "1.2 O objeto desta contratação não se enquadra como sendo de bem de luxo, \
             conforme Decreto Municipal nº 03/2024.",
        ),
        Block::paragraph(format!(
            "1.3 O prazo de vigência da contratação será de {} meses, contados da data de \
             assinatura da ARP (Ata Registro de Preço) ou do Contrato conforme celebrado, na \
             forma do artigo 105 da {}, podendo o mesmo ser prorrogado a critério da \
             Administração Pública.",
            ctx.request.term_or_default(),
            LAW_REFERENCE
        )),
        Block::paragraph(
            "1.4 O custo estimado total da contratação é de R$ 00.000,00 (descrever o valor em \
             reais) conforme custos unitários apostos na tabela acima, conforme pesquisa de preço \
             nos termos do Decreto Municipal nº 05/2024.",
        ),
    ]
}

/// Labeled entries for every non-blank field, in fixed order.
///
/// The unit-selection variant always states the term, falling back to the
/// same default clause 1.3 prints.
pub fn summary_entries(request: &ContractRequest, variant: TemplateVariant) -> Vec<Block> {
    let term = match variant {
        TemplateVariant::UnitSelection => request.term_or_default().to_string(),
        TemplateVariant::FreeText => request
            .term_months
            .map(|t| t.to_string())
            .unwrap_or_default(),
    };

    [
        ("Objeto detalhado", request.object.clone()),
        ("Unidade(s) demandante(s)", request.units_summary()),
        (
            "Quantidades estimadas / unidade de fornecimento",
            request.quantities.clone(),
        ),
        ("Local(is) de entrega / prestação", request.locations.clone()),
        ("Prazo(s) desejado(s)", request.deadlines.clone()),
        ("Prazo de vigência (meses)", term),
        (
            "Regime de execução/fornecimento pretendido",
            request.regime.clone(),
        ),
        (
            "Referências técnicas aplicáveis (ABNT, INMETRO, normas setoriais)",
            request.technical_references.clone(),
        ),
        (
            "Sustentabilidade e acessibilidade",
            request.sustainability.clone(),
        ),
        ("Riscos/condicionantes relevantes", request.risks.clone()),
        (
            "Justificativas internas disponíveis (ETP, estudos, pareceres)",
            request.internal_justifications.clone(),
        ),
    ]
    .into_iter()
    .filter_map(|(label, value)| Block::entry(label, &value))
    .collect()
}

/// Section 2: need for the contracting and legal basis.
pub fn need_and_legal_basis(ctx: &SectionContext<'_>) -> Vec<Block> {
    let mut blocks = vec![
        Block::heading(
            HeadingLevel::Two,
            "2. DESCRIÇÃO DA NECESSIDADE DA CONTRATAÇÃO E FUNDAMENTAÇÃO LEGAL",
        ),
        Block::paragraph(
            "- **Contexto e problema a resolver:** descreve por que o objeto é necessário, quem \
             será atendido e quais resultados públicos se pretende alcançar.",
        ),
        Block::paragraph(
            "- **Consequências da não contratação:** riscos operacionais, legais, orçamentários \
             e de continuidade do serviço público.",
        ),
        Block::paragraph(
            "- **Alinhamento ao planejamento:** vinculação a PPA/LDO/LOA e planos setoriais, \
             quando aplicável.",
        ),
        Block::paragraph(
            "- **Justificativa técnica e vantajosidade:** adequação do objeto em desempenho, \
             qualidade, custo total do ciclo de vida e economicidade.",
        ),
        Block::paragraph(format!(
            "- **Fundamentação legal sucinta:** dispositivos pertinentes da {} (ex.: art. 6º, \
             art. 40 e, quando cabível, art. 92) e Decreto Municipal nº 09/2024, sem \
             transcrições.",
            LAW_REFERENCE
        )),
    ];

    if let Some(draft) = ctx
        .options
        .drafted_justification
        .as_deref()
        .filter(|d| is_filled(d))
    {
        blocks.push(Block::Blank);
        blocks.push(Block::paragraph(
            "**Justificativa e necessidade da contratação (minuta):**",
        ));
        blocks.extend(drafted_lines(draft));
    }

    blocks
}

/// Drafted text as plain paragraphs. Heading markers are stripped so the
/// draft cannot alter the section structure.
fn drafted_lines(draft: &str) -> Vec<Block> {
    draft
        .lines()
        .map(|line| line.trim().trim_start_matches('#').trim())
        .filter(|line| !line.is_empty())
        .map(Block::paragraph)
        .collect()
}

/// Section 3: solution as a whole, options and lifecycle.
pub fn solution_description(ctx: &SectionContext<'_>) -> Vec<Block> {
    let mut blocks = vec![
        Block::heading(
            HeadingLevel::Two,
            "3. DESCRIÇÃO DA SOLUÇÃO COMO UM TODO (CICLO DE VIDA) E ESPECIFICAÇÃO DOS SERVIÇOS",
        ),
        Block::paragraph("**Resumo da necessidade (síntese):** [apresentar em 3–5 linhas]."),
        Block::Blank,
        Block::paragraph("**Opções de solução:**"),
        Block::paragraph(
            "- **Opção A — Execução própria pela Prefeitura:** recursos humanos, infraestrutura \
             e competências exigidas; limitações (ex.: ausência de suporte técnico/equipe \
             qualificada, custos de capacitação, riscos de continuidade) e inviabilidade \
             prática/econômica.",
        ),
        Block::paragraph(
            "- **Opção B — Contratação/Aquisição do objeto:** atendimento pelo mercado, níveis \
             de serviço, prazos, garantias, manutenção/assistência técnica.",
        ),
    ];

    if ctx.request.include_hybrid_option {
        blocks.push(Block::paragraph(format!(
            "- **{}:** parte interna + terceirização de etapas específicas, com avaliação de \
             prós e contras.",
            HYBRID_OPTION_TITLE
        )));
    }

    blocks.extend([
        Block::Blank,
        Block::paragraph(
            "**Conclusão – Solução escolhida:** justificar a alternativa mais vantajosa ao \
             interesse público (eficiência, economicidade e qualidade).",
        ),
        Block::paragraph(
            "**Ciclo de Vida do Objeto:** aquisição/implantação → operação → \
             manutenção/assistência → atualizações/treinamentos → desmobilização/descartes, \
             incluindo sustentabilidade, garantia e suporte pós‑venda.",
        ),
        Block::paragraph(
            "**Especificação técnica:** características mínimas, desempenho esperado, normas \
             aplicáveis (ABNT/INMETRO/ANVISA/ANEEL etc.), padrões de qualidade, prazos de \
             atendimento, SLAs e evidências de conformidade.",
        ),
    ]);
    blocks
}

/// Section 4: objective, verifiable requirements.
pub fn requirements(_ctx: &SectionContext<'_>) -> Vec<Block> {
    let mut blocks = vec![
        Block::heading(HeadingLevel::Two, "4. REQUISITOS DA CONTRATAÇÃO"),
        Block::paragraph("Liste requisitos **objetivos e verificáveis** (adapte ao objeto):"),
    ];
    blocks.extend(
        REQUIREMENTS
            .iter()
            .enumerate()
            .map(|(i, text)| Block::paragraph(format!("{}. {}", i + 1, text))),
    );
    blocks
}

/// Section 5: contract execution model.
pub fn execution_model(_ctx: &SectionContext<'_>) -> Vec<Block> {
    let mut blocks = vec![Block::heading(
        HeadingLevel::Two,
        "5. MODELO DE EXECUÇÃO CONTRATUAL",
    )];
    blocks.extend(
        EXECUTION_CLAUSES
            .iter()
            .enumerate()
            .map(|(i, text)| Block::paragraph(format!("- **5.{}** {}", i + 1, text))),
    );
    blocks
}

/// Measurement table with its single placeholder row.
pub fn measurement_table() -> Table {
    Table::new(vec![
        Column::left("Item"),
        Column::left("Descrição"),
        Column::left("Unidade"),
        Column::right("Qtde medida no período"),
        Column::right("Qtde acumulada"),
        Column::right("Saldo"),
    ])
    .with_row(["1", "[Descrever]", "[un/h/m²/mês]", "0", "0", "0"])
}

/// Section 6: measurement criteria and indicators.
pub fn measurement_criteria(ctx: &SectionContext<'_>) -> Vec<Block> {
    let mut blocks = vec![
        Block::heading(HeadingLevel::Two, "6. CRITÉRIOS DE MEDIÇÃO"),
        Block::paragraph("- **6.1 Itens e unidades de medida:**"),
        Block::Table(measurement_table()),
        Block::paragraph(
            "- **6.2 Evidências de execução:** relatórios, checklists assinados, registros \
             fotográficos, logs/sistemas, canhotos de entrega, certificados de treinamento.",
        ),
        Block::paragraph(
            "- **6.3 Critérios de aceite:** padrões técnicos, tolerâncias e desempenho; \
             procedimento de inspeção (amostragem, testes, prazos para correção).",
        ),
        Block::paragraph("- **6.4 Indicadores de desempenho (SLA/KPI):**"),
    ];

    if ctx.request.include_standard_kpis {
        blocks.extend(
            STANDARD_KPIS
                .iter()
                .map(|(name, formula)| Block::paragraph(format!("  - **{}:** {}", name, formula))),
        );
    } else {
        blocks.push(Block::paragraph(KPI_PLACEHOLDER));
    }

    blocks.extend([
        Block::paragraph(
            "- **6.5 Fórmulas de cálculo:** explicitar fórmulas dos indicadores adotados.",
        ),
        Block::paragraph("- **6.6 Periodicidade da medição:** [semanal/mensal/por OS/por marco]."),
        Block::paragraph(
            "- **6.7 Glosas e penalidades:** condições e procedimentos para glosa/desconto, \
             reconvocação, reexecução e penalidades contratuais (sem transcrições legais).",
        ),
        Block::paragraph(
            "- **6.8 Aceite final:** condições para aceite definitivo, termo de recebimento e \
             encerramento.",
        ),
    ]);
    blocks
}

/// Closing reminder to adapt the template.
pub fn closing_note(_ctx: &SectionContext<'_>) -> Vec<Block> {
    vec![
        Block::Blank,
        Block::Rule,
        Block::paragraph(
            "_Observação: este documento deve ser ajustado ao objeto específico, convertendo \
             requisitos em métricas mensuráveis (números, tolerâncias, prazos e padrões)._",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::TermMonths;
    use chrono::NaiveDate;

    fn jurisdiction() -> Jurisdiction {
        Jurisdiction::new("Brasnorte-MT", NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
    }

    fn lines(blocks: &[Block]) -> Vec<String> {
        blocks.iter().flat_map(Block::markup_lines).collect()
    }

    #[test]
    fn header_carries_municipality_and_date() {
        let request = ContractRequest::new("x");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let text = lines(&header(&SectionContext::new(&request, &j, &options)));
        assert_eq!(text[0], "# TERMO DE REFERÊNCIA — Lei nº 14.133/2021");
        assert!(text.contains(&"**Município:** Brasnorte-MT  ".to_string()));
        assert!(text.contains(&"**Data:** 15/10/2026".to_string()));
    }

    #[test]
    fn object_markup_uses_placeholder_when_blank() {
        let request = ContractRequest::new("  ");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let ctx = SectionContext::new(&request, &j, &options);
        assert_eq!(ctx.object_markup(), "**[INSERIR OBJETO SOLICITADO]**");
    }

    #[test]
    fn free_text_preamble_cites_municipal_decree_with_slash() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let text = lines(&general_conditions(&SectionContext::new(&request, &j, &options)))
            .join("\n");
        assert!(text.contains("Decreto Municipal nº 09/2024 (Brasnorte/MT)"));
        assert!(!text.contains("1.2 O objeto"));
    }

    #[test]
    fn numbered_preamble_uses_requested_term() {
        let request = ContractRequest {
            term_months: Some(TermMonths::new(24).unwrap()),
            ..ContractRequest::new("obj")
        };
        let options = GenerationOptions::for_variant(TemplateVariant::UnitSelection);
        let j = jurisdiction();
        let text = lines(&general_conditions(&SectionContext::new(&request, &j, &options)))
            .join("\n");
        assert!(text.contains("1.1 O presente Termo de Referência tem por objeto **obj**"));
        assert!(text.contains("será de 24 meses"));
        assert!(text.contains("Decreto Municipal nº 03/2024"));
        assert!(text.contains("Decreto Municipal nº 05/2024"));
        assert!(text.contains("custos unitários apostos na tabela acima"));
        assert!(text.contains("- **Prazo de vigência (meses):** 24"));
    }

    #[test]
    fn numbered_preamble_defaults_to_twelve_months() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::for_variant(TemplateVariant::UnitSelection);
        let j = jurisdiction();
        let text = lines(&general_conditions(&SectionContext::new(&request, &j, &options)))
            .join("\n");
        assert!(text.contains("será de 12 meses"));
        assert!(text.contains("- **Prazo de vigência (meses):** 12"));
    }

    #[test]
    fn free_text_omits_term_when_absent() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let text = lines(&general_conditions(&SectionContext::new(&request, &j, &options)))
            .join("\n");
        assert!(!text.contains("Prazo de vigência (meses)"));
    }

    #[test]
    fn multi_line_object_stays_on_one_line() {
        let request = ContractRequest::new("Papel A4\n## 7. OUTRA SEÇÃO\n");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let ctx = SectionContext::new(&request, &j, &options);
        assert_eq!(ctx.object_markup(), "**Papel A4; ## 7. OUTRA SEÇÃO**");
    }

    #[test]
    fn summary_entries_follow_fixed_order() {
        let request = ContractRequest {
            risks: "sazonalidade".to_string(),
            quantities: "2.000 unidades".to_string(),
            ..ContractRequest::new("obj")
        };
        let labels: Vec<String> = summary_entries(&request, TemplateVariant::FreeText)
            .into_iter()
            .map(|b| match b {
                Block::Entry { label, .. } => label,
                other => panic!("unexpected block {:?}", other),
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "Objeto detalhado",
                "Quantidades estimadas / unidade de fornecimento",
                "Riscos/condicionantes relevantes",
            ]
        );
    }

    #[test]
    fn drafted_justification_is_appended_without_headings() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::default()
            .with_drafted_justification("## Título\n\nPrimeiro parágrafo.\nSegundo.");
        let j = jurisdiction();
        let text = lines(&need_and_legal_basis(&SectionContext::new(&request, &j, &options)));
        assert!(text.contains(&"**Justificativa e necessidade da contratação (minuta):**".to_string()));
        assert!(text.contains(&"Título".to_string()));
        assert!(text.contains(&"Primeiro parágrafo.".to_string()));
        assert!(!text.iter().any(|l| l.starts_with("## Título")));
    }

    #[test]
    fn blank_drafted_justification_is_ignored() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::default().with_drafted_justification("  \n ");
        let j = jurisdiction();
        let blocks = need_and_legal_basis(&SectionContext::new(&request, &j, &options));
        assert_eq!(blocks.len(), 6);
    }

    #[test]
    fn requirements_are_numbered_one_to_twelve() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let text = lines(&requirements(&SectionContext::new(&request, &j, &options)));
        assert!(text[2].starts_with("1. Conformidade técnica"));
        assert!(text.last().unwrap().starts_with("12. Penalidades"));
    }

    #[test]
    fn execution_clauses_are_numbered_under_section_five() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let text = lines(&execution_model(&SectionContext::new(&request, &j, &options)));
        assert_eq!(text.len(), 15);
        assert!(text[1].starts_with("- **5.1** "));
        assert!(text[14].starts_with("- **5.14** "));
    }

    #[test]
    fn measurement_table_has_one_placeholder_row() {
        let table = measurement_table();
        assert_eq!(table.columns.len(), 6);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            table.lines()[1],
            "  |---|---|---|---:|---:|---:|"
        );
    }

    #[test]
    fn sections_are_in_document_order() {
        let request = ContractRequest::new("obj");
        let options = GenerationOptions::default();
        let j = jurisdiction();
        let ctx = SectionContext::new(&request, &j, &options);
        let first_lines: Vec<String> = SECTIONS
            .iter()
            .map(|build| build(&ctx))
            .filter_map(|blocks| match blocks.first() {
                Some(Block::Heading { text, .. }) => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(first_lines.len(), 7);
        assert!(first_lines[1].starts_with("1. "));
        assert!(first_lines[6].starts_with("6. "));
    }
}
