//! Unit tests for output file naming

use geosplit::services::slug::{escape_code, fold_diacritics, output_identifier, slugify};

#[test]
fn plain_names() {
    assert_eq!(slugify("Belo Horizonte"), "belo_horizonte");
    assert_eq!(slugify("Uberlandia"), "uberlandia");
}

#[test]
fn diacritics_are_removed() {
    assert_eq!(slugify("São João del-Rei"), "sao_joao_del_rei");
    assert_eq!(slugify("Pingo-d'Água"), "pingo_d_agua");
    assert_eq!(slugify("Itaú de Minas"), "itau_de_minas");
    assert_eq!(fold_diacritics("Conceição"), "Conceicao");
}

#[test]
fn separators_collapse_and_trim() {
    assert_eq!(slugify("  --Santa   Luzia!! "), "santa_luzia");
    assert_eq!(slugify("Três Marias 2"), "tres_marias_2");
    assert_eq!(slugify("???"), "");
}

#[test]
fn identifier_combines_slug_and_code() {
    assert_eq!(
        output_identifier("3106200", "Belo Horizonte"),
        "belo_horizonte-3106200.geojson"
    );
    assert_eq!(
        output_identifier("3170206", "Uberlândia"),
        "uberlandia-3170206.geojson"
    );
}

#[test]
fn unnamed_municipality_uses_fixed_stem() {
    assert_eq!(output_identifier("3106200", ""), "sem_nome-3106200.geojson");
    assert_eq!(output_identifier("3106200", "***"), "sem_nome-3106200.geojson");
}

#[test]
fn codes_with_separators_keep_identifiers_distinct() {
    let unnamed = output_identifier("a-b", "");
    let named = output_identifier("b-a-b", "A");
    assert_eq!(unnamed, "sem_nome-a-b.geojson");
    assert_eq!(named, "a-b-a-b.geojson");
    assert_ne!(unnamed, named);
}

#[test]
fn unsafe_code_characters_are_escaped() {
    assert_eq!(escape_code("3106200"), "3106200");
    assert_eq!(escape_code("MG/31"), "MG%2F31");
    assert_eq!(escape_code("50%"), "50%25");
    assert_eq!(escape_code("São"), "S%C3%A3o");
    assert_eq!(output_identifier("../x", "Belo Horizonte"), "belo_horizonte-..%2Fx.geojson");
    assert_ne!(escape_code("a/b"), escape_code("a%2Fb"));
}
