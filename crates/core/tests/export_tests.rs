//! Rust record generation tests

mod export_tests {
    use std::collections::HashSet;

    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;
    use xml_typegen_core::export::{ExportError, FieldKind, RecordDef, RustExporter};
    use xml_typegen_core::inference::{InferenceConfig, XMLConverter};

    fn converter_with(config: InferenceConfig, docs: &[&str]) -> XMLConverter {
        let mut converter = XMLConverter::with_config(config);
        for doc in docs {
            converter.ingest_str(doc).unwrap();
        }
        converter
    }

    fn records(docs: &[&str]) -> Vec<RecordDef> {
        let converter = converter_with(InferenceConfig::default(), docs);
        RustExporter::new(InferenceConfig::default())
            .records(converter.tree())
            .unwrap()
    }

    fn record<'a>(records: &'a [RecordDef], name: &str) -> &'a RecordDef {
        records
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no record named {}", name))
    }

    const FEED_DOCS: &[&str] = &[
        r#"<feed version="2"><entry id="1"><title>One</title><link href="a"/><link href="b"/></entry></feed>"#,
        r#"<feed><entry id="2" draft="yes"><title>Two</title><summary>S</summary></entry><entry/></feed>"#,
        r#"<status code="ok">fine</status>"#,
        r#"<feed><author><name>N</name></author></feed>"#,
    ];

    #[test]
    fn test_empty_attribute_not_generated() {
        let records = records(&[r#"<root name="John" empty=""><subnode>text</subnode></root>"#]);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "Root_Subnode"]);

        let root = record(&records, "Root");
        assert_eq!(root.fields.len(), 2);
        assert_eq!(
            root.fields[0].kind,
            FieldKind::Attribute {
                name: "name".to_string()
            }
        );
        let subnode = record(&records, "Root_Subnode");
        assert_eq!(subnode.fields.len(), 1);
        assert_eq!(subnode.fields[0].kind, FieldKind::Content);
    }

    #[test]
    fn test_attribute_and_child_idents_differ() {
        let records = records(&[r#"<root name="John"><name>value</name></root>"#]);
        let root = record(&records, "Root");
        let idents: Vec<_> = root.fields.iter().map(|f| f.ident.as_str()).collect();
        assert_eq!(idents, vec!["Name", "Name_"]);
    }

    #[test]
    fn test_same_shape_reuses_type() {
        let records = records(&[r#"<root><a x="1"/><b x="1"/></root>"#]);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "Root_A"]);

        let root = record(&records, "Root");
        for field in &root.fields {
            match &field.kind {
                FieldKind::Child { type_name, .. } => assert_eq!(type_name, "Root_A"),
                other => panic!("unexpected field {:?}", other),
            }
        }
    }

    #[test]
    fn test_repeated_child_is_vec() {
        let converter = converter_with(
            InferenceConfig::default(),
            &[r#"<f><g v="1"/><g v="2"/></f>"#],
        );
        let code = converter.generate_string().unwrap();
        assert!(code.contains("pub G: ::std::vec::Vec<F_G>,"));
        assert!(code.contains("#[serde(rename = \"@v\", default)]"));
    }

    #[test]
    fn test_merged_converters_generate_union() {
        let first = converter_with(InferenceConfig::default(), &["<a/>"]);
        let second = converter_with(InferenceConfig::default(), &[r#"<a name="x"/>"#]);
        let code = XMLConverter::combine(&first, &second)
            .generate_string()
            .unwrap();
        assert!(code.contains("#[serde(rename = \"@name\", default)]\n    pub Name: ::std::string::String,"));
    }

    #[test]
    fn test_canonical_output_ignores_ingestion_order() {
        let mut reversed = FEED_DOCS.to_vec();
        reversed.reverse();

        let forward = converter_with(InferenceConfig::default(), FEED_DOCS);
        let backward = converter_with(InferenceConfig::default(), &reversed);
        assert_eq!(
            forward.generate_string().unwrap(),
            backward.generate_string().unwrap()
        );
        assert_ne!(forward.tree(), backward.tree());
    }

    #[test]
    fn test_preserved_order_follows_first_seen() {
        let config = InferenceConfig::builder().canonical(false).build();
        let converter = converter_with(config, &[r#"<r z="1" a="2"><y/><b k="v"/></r>"#]);
        let records = RustExporter::new(converter.config().clone())
            .records(converter.tree())
            .unwrap();
        let idents: Vec<_> = records[0].fields.iter().map(|f| f.ident.as_str()).collect();
        assert_eq!(idents, vec!["Z", "A", "Y", "B"]);

        let records = records_sorted(&converter);
        let idents: Vec<_> = records[0].fields.iter().map(|f| f.ident.as_str()).collect();
        assert_eq!(idents, vec!["A", "Z", "B", "Y"]);
    }

    fn records_sorted(converter: &XMLConverter) -> Vec<RecordDef> {
        RustExporter::new(InferenceConfig::default())
            .records(converter.tree())
            .unwrap()
    }

    #[test]
    fn test_names_and_fields_are_unique() {
        let records = records(FEED_DOCS);
        let mut seen = HashSet::new();
        for record in &records {
            assert!(seen.insert(record.name.clone()), "duplicate {}", record.name);
            let mut idents = HashSet::new();
            for field in &record.fields {
                assert!(idents.insert(field.ident.clone()), "duplicate field {}", field.ident);
            }
        }
        let top: Vec<_> = records
            .iter()
            .filter_map(|r| r.root_tag.as_deref())
            .collect();
        assert_eq!(top, vec!["feed", "status"]);
    }

    #[test]
    fn test_every_child_type_is_defined() {
        let records = records(FEED_DOCS);
        let defined: HashSet<_> = records.iter().map(|r| r.name.as_str()).collect();
        for record in &records {
            for field in &record.fields {
                if let FieldKind::Child { type_name, .. } = &field.kind {
                    assert!(defined.contains(type_name.as_str()), "{} undefined", type_name);
                }
            }
        }
    }

    #[test]
    fn test_empty_identifier_reports_path() {
        let converter = converter_with(InferenceConfig::default(), &["<root><item/></root>"]);
        assert!(converter.generate_string().is_ok());

        let mut converter = XMLConverter::new();
        converter
            .ingest_element(
                &xml_typegen_core::XMLElement::new("root")
                    .with_child(xml_typegen_core::XMLElement::new("---")),
            )
            .unwrap();
        assert_eq!(
            converter.generate_string(),
            Err(ExportError::EmptyIdentifier {
                path: "root/---".to_string()
            })
        );
    }

    #[test]
    fn test_generate_file_writes_nothing_on_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("model.rs");

        let mut broken = XMLConverter::new();
        broken
            .ingest_element(&xml_typegen_core::XMLElement::new("%"))
            .unwrap();
        assert!(broken.generate_file(&path).is_err());
        assert!(!path.exists());

        let converter = converter_with(InferenceConfig::default(), FEED_DOCS);
        converter.generate_file(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, converter.generate_string().unwrap());
    }

    // Generated for `<library name="City"><book id="1"><title>Dune</title></book>...</library>`
    #[allow(non_camel_case_types, non_snake_case)]
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename = "library")]
    pub struct Library {
        #[serde(rename = "@name", default)]
        pub Name: String,
        #[serde(rename = "book", default)]
        pub Book: Vec<Library_Book>,
    }

    #[allow(non_camel_case_types, non_snake_case)]
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Library_Book {
        #[serde(rename = "@id", default)]
        pub Id: String,
        #[serde(rename = "title", default)]
        pub Title: Library_Book_Title,
    }

    #[allow(non_camel_case_types, non_snake_case)]
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Library_Book_Title {
        #[serde(rename = "$text", default)]
        pub Content: String,
    }

    #[test]
    fn test_generated_records_deserialize_samples() {
        let sample = r#"<library name="City"><book id="1"><title>Dune</title></book><book id="2"><title>Emma</title></book></library>"#;
        let converter = converter_with(InferenceConfig::default(), &[sample]);
        let code = converter.generate_string().unwrap();

        let expected_body = "\
pub struct Library_Book {
    #[serde(rename = \"@id\", default)]
    pub Id: String,
    #[serde(rename = \"title\", default)]
    pub Title: Library_Book_Title,
}";
        assert!(code.contains(expected_body));
        assert!(code.contains("pub Book: ::std::vec::Vec<Library_Book>,"));

        let library: Library = quick_xml::de::from_str(sample).unwrap();
        assert_eq!(library.Name, "City");
        assert_eq!(library.Book.len(), 2);
        assert_eq!(library.Book[1].Id, "2");
        assert_eq!(library.Book[0].Title.Content, "Dune");
    }

    #[test]
    fn test_non_identifier_name_chars_are_dropped() {
        let converter = converter_with(
            InferenceConfig::default(),
            &[r#"<x⁴ k½="1"><ßeta/></x⁴>"#],
        );
        let code = converter.generate_string().unwrap();
        assert!(code.contains("#[serde(rename = \"x⁴\")]\npub struct X {"));
        assert!(code.contains("#[serde(rename = \"@k½\", default)]\n    pub K: "));
        assert!(code.contains("pub ßeta: X_ßeta,"));
    }
}
