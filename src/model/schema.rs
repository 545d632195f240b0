//! The fixed destination layout required by the downstream collections system.
//!
//! The rename table and the column list are static configuration data, not logic: the API speaks
//! in its own field names and the collections system demands exactly this 113-column layout, in
//! this order, on every remittance. Source fields with no entry in [`COLUMN_MAP`] are dropped;
//! destination columns with no source value are filled with the empty string.

/// Maps API field names to destination column titles. Fields not listed here are dropped during
/// normalization.
pub const COLUMN_MAP: [(&str, &str); 30] = [
    ("tipo", "TIPO"),
    ("nome_operacao", "NOME OPERAÇÃO"),
    ("dt_atualizacao", "DT. ATUALIZADO"),
    ("vencimento", "DT. VENCIMENTO"),
    ("vl_venda", "VALOR OPERAÇÃO"),
    ("vl_vencido", "VALOR VENCIDO"),
    ("cpf_cnpj", "CPF / CNPJ"),
    ("nome", "NOME DO CLIENTE"),
    ("endereco", "ENDEREÇO"),
    ("bairro", "BAIRRO"),
    ("cep", "CEP"),
    ("cidade", "CIDADE"),
    ("uf", "UF"),
    ("telefone1", "TELEFONE 1"),
    ("telefone2", "TELEFONE 2"),
    ("telefone3", "TELEFONE 3"),
    ("telefone4", "TELEFONE 4"),
    ("telefone5", "TELEFONE 5"),
    ("telefone6", "TELEFONE 6"),
    ("data_nascimento", "DATA NASCIMENTO"),
    ("naturalidade", "NATURALIDADE"),
    ("sexo", "SEXO"),
    ("estado_civil", "ESTADO CIVIL"),
    ("pai", "NOME DO PAI"),
    ("mae", "NOME DA MÃE"),
    ("email", "E-MAIL"),
    ("data_emissao", "DT. EMISSÃO"),
    ("benefs_contrato", "OBS. OPERAÇÃO"),
    ("mci", "NR OPERAÇÃO"),
    ("nr_ficha", "CONTA"),
];

/// The destination column titles, in the exact order the collections system expects.
pub const TARGET_COLUMNS: [&str; 113] = [
    "TIPO",
    "NR OPERAÇÃO",
    "NOME OPERAÇÃO",
    "AGENCIA",
    "CONTA",
    "PRODUTO",
    "DT. ATUALIZADO",
    "DT. VENCIMENTO",
    "VALOR OPERAÇÃO",
    "VALOR VENCIDO",
    "COND. NEGOCIAIS",
    "CPF / CNPJ",
    "MCI",
    "NR FICHA",
    "NOME DO CLIENTE",
    "ENDEREÇO",
    "BAIRRO",
    "CEP",
    "CIDADE",
    "UF",
    "TELEFONE 1",
    "TELEFONE 2",
    "TELEFONE 3",
    "TELEFONE 4",
    "TELEFONE 5",
    "TELEFONE 6",
    "DATA NASCIMENTO",
    "NATURALIDADE",
    "SEXO",
    "ESTADO CIVIL",
    "NOME DO PAI",
    "NOME DA MÃE",
    "NOME AVALISTA 1",
    "CPF/CNPJ AVALISTA 1",
    "ENDEREÇO AVALISTA 1",
    "BAIRRO AVALISTA 1",
    "CEP AVALISTA 1",
    "CIDADE AVALISTA 1",
    "UF AVALISTA 1",
    "TELEFONE 1 AVALISTA 1",
    "TELEFONE 2 AVALISTA 1",
    "NOME AVALISTA 2",
    "CPF/CNPJ AVALISTA 2",
    "ENDEREÇO AVALISTA 2",
    "BAIRRO AVALISTA 2",
    "CEP AVALISTA 2",
    "CIDADE AVALISTA 2",
    "UF AVALISTA 2",
    "TELEFONE 1 AVALISTA 2",
    "TELEFONE 2 AVALISTA 2",
    "NOME AVALISTA 3",
    "CPF/CNPJ AVALISTA 3",
    "ENDEREÇO AVALISTA 3",
    "BAIRRO AVALISTA 3",
    "CEP AVALISTA 3",
    "CIDADE AVALISTA 3",
    "UF AVALISTA 3",
    "TELEFONE 1 AVALISTA 3",
    "TELEFONE 2 AVALISTA 3",
    "NOME AVALISTA 4",
    "CPF/CNPJ AVALISTA 4",
    "ENDEREÇO AVALISTA 4",
    "BAIRRO AVALISTA 4",
    "CEP AVALISTA 4",
    "CIDADE AVALISTA 4",
    "UF AVALISTA 4",
    "TELEFONE 1 AVALISTA 4",
    "TELEFONE 2 AVALISTA 4",
    "NOME AVALISTA 5",
    "CPF/CNPJ AVALISTA 5",
    "ENDEREÇO AVALISTA 5",
    "BAIRRO AVALISTA 5",
    "CEP AVALISTA 5",
    "CIDADE AVALISTA 5",
    "UF AVALISTA 5",
    "TELEFONE 1 AVALISTA 5",
    "TELEFONE 2 AVALISTA 5",
    "NOME AVALISTA 6",
    "CPF/CNPJ AVALISTA 6",
    "ENDEREÇO AVALISTA 6",
    "BAIRRO AVALISTA 6",
    "CEP AVALISTA 6",
    "CIDADE AVALISTA 6",
    "UF AVALISTA 6",
    "TELEFONE 1 AVALISTA 6",
    "TELEFONE 2 AVALISTA 6",
    "PROFISSÃO",
    "NOME LOCAL DE TRABALHO",
    "ENDEREÇO LOCAL DE TRABALHO",
    "BAIRRO LOCAL DE TRABALHO",
    "CEP LOCAL DE TRABALHO",
    "CIDADE LOCAL DE TRABALHO",
    "UF LOCAL DE TRABALHO",
    "TELEFONE 1 LOCAL DE TRABALHO",
    "TELEFONE 2 LOCAL DE TRABALHO",
    "REFERENCIA PESSOAL",
    "TELEFONE 1 REFERENCIA",
    "TELEFONE 2 REFERENCIA",
    "REFERENCIA PESSOAL 2",
    "TELEFONE 1 REFERENCIA 2",
    "TELEFONE 2 REFERENCIA 2",
    "REFERENCIA PESSOAL 3",
    "TELEFONE 1 REFERENCIA 3",
    "TELEFONE 2 REFERENCIA 3",
    "SPC/SERASA",
    "E-MAIL",
    "DT. EMISSÃO",
    "VALOR PROTESTO",
    "OBS. OPERAÇÃO",
    "DT. FIMTERCERIZAÇÃO",
    "VALOR JUROS",
    "COD_CLASSIFICACAO_CLIENTE",
    "COD_CLASSIFICACAO_OPERACAO",
];

/// Looks up the destination column title for an API field name, `None` for unmapped fields.
pub fn destination_column(api_field: &str) -> Option<&'static str> {
    COLUMN_MAP
        .iter()
        .find(|(source, _)| *source == api_field)
        .map(|(_, destination)| *destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_target_columns_are_unique() {
        let unique: BTreeSet<&str> = TARGET_COLUMNS.iter().copied().collect();
        assert_eq!(unique.len(), TARGET_COLUMNS.len());
    }

    #[test]
    fn test_every_mapped_destination_is_a_target_column() {
        for (source, destination) in COLUMN_MAP {
            assert!(
                TARGET_COLUMNS.contains(&destination),
                "'{source}' maps to '{destination}' which is not a target column"
            );
        }
    }

    #[test]
    fn test_destination_column_lookup() {
        assert_eq!(destination_column("mci"), Some("NR OPERAÇÃO"));
        assert_eq!(destination_column("nr_ficha"), Some("CONTA"));
        assert_eq!(destination_column("unknown_field"), None);
    }
}
