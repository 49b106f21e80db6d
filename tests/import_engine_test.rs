use anyhow::Result;
use lead_admin::core::id_gen::SequentialIdGenerator;
use lead_admin::{CsvImportPipeline, ImportEngine, Lead, LocalStorage, OutputFormat};
use tempfile::TempDir;

const INPUT_CSV: &str = "Full Name;Mail;Organization;City;Country;Rating\n\
                         Dewi Lestari;dewi@batik.id;\"Batik; Tenun\";Solo;Indonesia;4.8\n\
                         ;;;;;\n\
                         Rudi;rudi@kopi.id;Kopi Kita;;;n/a\n";

/// 以 LocalStorage 讀寫暫存目錄，確認 JSON 輸出
#[tokio::test]
async fn test_import_csv_to_json_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let input_path = temp_dir.path().join("input.csv");
    std::fs::write(&input_path, INPUT_CSV)?;

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = CsvImportPipeline::new(
        storage,
        input_path.to_str().unwrap(),
        output_path.clone(),
        OutputFormat::Json,
        Box::new(SequentialIdGenerator::new("t")),
    );

    let written = ImportEngine::new(pipeline).run().await?;
    assert!(written.ends_with("leads.json"));

    let data = std::fs::read(temp_dir.path().join("leads.json"))?;
    let leads: Vec<Lead> = serde_json::from_slice(&data)?;
    assert_eq!(leads.len(), 3);

    assert_eq!(leads[0].id, "dewibatikid-t1");
    assert_eq!(leads[0].company, "Batik; Tenun");
    assert_eq!(leads[0].location, "Solo, Indonesia");
    assert_eq!(leads[0].rating, Some(4.8));

    assert_eq!(leads[1].name, "Unknown Lead 2");
    assert_eq!(leads[1].email, "unknown2@example.com");
    assert_eq!(leads[1].company, "Unknown Company");
    assert_eq!(leads[1].id, "UnknownLead2-t2");

    assert_eq!(leads[2].location, "-");
    assert_eq!(leads[2].rating, None);

    Ok(())
}

#[tokio::test]
async fn test_import_csv_to_quoted_csv_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let input_path = temp_dir.path().join("input.csv");
    std::fs::write(&input_path, "name,company\nAyu,\"Say \"\"Hi\"\" Co\"\n")?;

    let pipeline = CsvImportPipeline::new(
        LocalStorage::new(output_path.clone()),
        input_path.to_str().unwrap(),
        output_path,
        OutputFormat::Csv,
        Box::new(SequentialIdGenerator::default()),
    );
    ImportEngine::new(pipeline).run().await?;

    let exported = std::fs::read_to_string(temp_dir.path().join("leads.csv"))?;
    let mut lines = exported.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Position,Email,Phone,Company,Industry,Size,Location,LinkedIn,Website")
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("\"Ayu\",\"Business Owner\""));
    assert!(row.contains("\"Say \"\"Hi\"\" Co\""));
    assert!(lines.next().is_none());

    Ok(())
}

#[tokio::test]
async fn test_import_rejects_wrong_extension() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let input_path = temp_dir.path().join("input.txt");
    std::fs::write(&input_path, "name\nA\n")?;

    let pipeline = CsvImportPipeline::new(
        LocalStorage::new(output_path.clone()),
        input_path.to_str().unwrap(),
        output_path,
        OutputFormat::Json,
        Box::new(SequentialIdGenerator::default()),
    );
    let result = ImportEngine::new(pipeline).run().await;

    let err = result.unwrap_err();
    assert_eq!(err.user_friendly_message(), "Please select a .csv file");
    assert!(!temp_dir.path().join("leads.json").exists());

    Ok(())
}
