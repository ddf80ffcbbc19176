// Column names of the enrollment export and of the derived billing columns.

pub const PARTICIPACAO: &str = "participacao";
pub const DATA_ASSINATURA_PROPOSTA: &str = "data_assinatura_proposta";
pub const DATA_VIGENCIA: &str = "data_vigencia";
pub const DATA_NASCIMENTO: &str = "data_nascimento";
pub const END_UF: &str = "end_uf";
pub const PARCELAS_ABERTO: &str = "parcelas_aberto";
pub const DATA_ULTIMO_PAGAMENTO: &str = "data_ultimo_pagamento";
pub const PROGRAMA_BENEFICIO: &str = "programa_beneficio";
pub const STATUS_PARTICIPACAO: &str = "status_participacao";

pub const IDADE: &str = "idade";
pub const FAIXA_ETARIA: &str = "faixa_etaria";
pub const REGIAO_UF: &str = "regiao_uf";
pub const TIPO_FATURAMENTO: &str = "tipo_faturamento";

/// Input columns kept by the projector, in output order.
pub const REQUIRED_COLUMNS: [&str; 25] = [
    PARTICIPACAO,
    "proposta",
    "num_proposta",
    DATA_ASSINATURA_PROPOSTA,
    DATA_VIGENCIA,
    "cpf",
    "nome_proponente",
    "qualificacao",
    DATA_NASCIMENTO,
    "sexo",
    "estado_civil",
    "end_cidade",
    END_UF,
    "ultimo_desconto",
    "ultimo_capital",
    "forma_pagamento",
    PARCELAS_ABERTO,
    DATA_ULTIMO_PAGAMENTO,
    PROGRAMA_BENEFICIO,
    "promotor",
    "distribuidor",
    "canal_distribuicao",
    "aposentado",
    "pensionista",
    STATUS_PARTICIPACAO,
];

/// Columns coerced to dates by the type normalizer.
pub const DATE_COLUMNS: [&str; 4] = [
    DATA_NASCIMENTO,
    DATA_ASSINATURA_PROPOSTA,
    DATA_VIGENCIA,
    DATA_ULTIMO_PAGAMENTO,
];

/// Columns appended by the pipeline, in the order they are added.
pub const DERIVED_COLUMNS: [&str; 4] = [IDADE, FAIXA_ETARIA, REGIAO_UF, TIPO_FATURAMENTO];
