mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mailscrape::workbook::read_table;
    use mockito::Server;
    use predicates::str::{contains, starts_with};
    use rust_xlsxwriter::Workbook;

    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "mailscrape";

    fn write_workbook(dir: &Path, urls: &[&str]) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = dir.join("sites.xlsx");
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();
        sheet.set_name("Sheet1")?;
        sheet.write_string(0, 0, "Name")?;
        sheet.write_string(0, 1, "URL")?;
        for (i, url) in urls.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, format!("Site {i}"))?;
            sheet.write_string(row, 1, *url)?;
        }
        book.save(&path)?;
        Ok(path)
    }

    fn outputs_in(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let mut outputs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_output = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with("output_emails_"));
            if is_output {
                outputs.push(path);
            }
        }
        Ok(outputs)
    }

    #[test]
    fn test_output__when_no_input_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config");

        cmd.assert()
            .failure()
            .stderr(contains("Error: No input file provided"));
        Ok(())
    }

    #[test]
    fn test_output__when_input_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config").arg(dir.path().join("absent.xlsx"));

        cmd.assert()
            .failure()
            .stderr(contains("File not found"));
        assert!(outputs_in(dir.path())?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_pages_have_addresses() -> TestResult {
        let mut server = Server::new_async().await;
        let _contact = server
            .mock("GET", "/contact")
            .with_status(200)
            .with_body(
                r#"<p><a href="mailto:sales@acme.test">Sales</a>
                   <a href="MAILTO:info@acme.test">Info</a>
                   <a href="mailto:sales@acme.test">Sales again</a></p>"#,
            )
            .create_async()
            .await;
        let _about = server
            .mock("GET", "/about")
            .with_status(200)
            .with_body("<p>Nothing to see</p>")
            .create_async()
            .await;
        let contact = server.url() + "/contact";
        let about = server.url() + "/about";
        let dir = tempfile::tempdir()?;
        let input = write_workbook(dir.path(), &[contact.as_str(), about.as_str()])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config").arg("--no-progress").arg(&input);

        cmd.assert()
            .success()
            .stdout(starts_with("Starting scraping at "))
            .stdout(contains(format!(
                "fetched {contact}: info@acme.test, sales@acme.test"
            )))
            .stdout(contains(format!("fetched {about}: No mails found")))
            .stdout(contains("Total duration: "))
            .stdout(contains("Scraping completed successfully!"))
            .stdout(contains("Output file: "));

        let outputs = outputs_in(dir.path())?;
        assert_eq!(outputs.len(), 1);
        let table = read_table(&outputs[0], "Sheet1")?;
        assert_eq!(table.headers(), ["Name", "URL", "Email"]);
        assert_eq!(
            table.column("Email"),
            Some(vec![
                "info@acme.test, sales@acme.test".to_string(),
                "No emails found".to_string(),
            ])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_page_fails() -> TestResult {
        let mut server = Server::new_async().await;
        let _gone = server
            .mock("GET", "/gone")
            .with_status(410)
            .create_async()
            .await;
        let gone = server.url() + "/gone";
        let dir = tempfile::tempdir()?;
        let input = write_workbook(dir.path(), &[gone.as_str()])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("--detailed-errors")
            .arg("--strategy")
            .arg("unbounded")
            .arg(&input);

        // Per-URL failures never fail the run
        cmd.assert()
            .success()
            .stdout(contains(format!(
                "fetched {gone}: Error fetching email (HTTP status 410)"
            )));

        let outputs = outputs_in(dir.path())?;
        let table = read_table(&outputs[0], "Sheet1")?;
        assert_eq!(
            table.column("Email"),
            Some(vec!["Error fetching email: HTTP status 410".to_string()])
        );
        Ok(())
    }

    #[test]
    fn test_output__when_quiet() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input = write_workbook(dir.path(), &[])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config").arg("--quiet").arg(&input);

        cmd.assert()
            .success()
            .stdout(starts_with("Output file: "));
        Ok(())
    }

    #[test]
    fn test_output__when_sheet_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input = write_workbook(dir.path(), &["https://example.test"])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config").arg("--sheet").arg("Leads").arg(&input);

        cmd.assert()
            .failure()
            .stderr(contains("Missing sheet: 'Leads' (available: Sheet1)"));
        Ok(())
    }

    #[test]
    fn test_output__when_url_column_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input = write_workbook(dir.path(), &["https://example.test"])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("--url-column")
            .arg("Website")
            .arg(&input);

        cmd.assert()
            .failure()
            .stderr(contains("Missing column: 'Website' in sheet 'Sheet1'"));
        Ok(())
    }

    #[test]
    fn test_config__invalid_timeout() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input = write_workbook(dir.path(), &[])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config").arg("--timeout").arg("0").arg(&input);

        cmd.assert()
            .failure()
            .stderr(contains("Timeout cannot be 0"));
        Ok(())
    }

    #[test]
    fn test_config__file_sets_output_prefix() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input = write_workbook(dir.path(), &[])?;
        let config = dir.path().join("scrape.toml");
        fs::write(&config, "output_prefix = \"urls_with_emails\"\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg(&config).arg(&input);

        cmd.assert()
            .success()
            .stdout(contains("urls_with_emails_"));
        Ok(())
    }

    #[test]
    fn test_config__unknown_key_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let config = dir.path().join("scrape.toml");
        fs::write(&config, "threads = 4\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg(&config).arg("sites.xlsx");

        cmd.assert()
            .failure()
            .stderr(contains("Invalid TOML in config file"));
        Ok(())
    }

    #[test]
    fn test_help__lists_options() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(contains("--workers"))
            .stdout(contains("--strategy"))
            .stdout(contains("--url-column"))
            .stdout(contains("shell"));
        Ok(())
    }

    #[test]
    fn test_completion_generate__bash() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("completion-generate").arg("bash");

        cmd.assert().success().stdout(contains("mailscrape"));
        Ok(())
    }

    #[test]
    fn test_strategy__rejects_unknown_value() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--strategy").arg("threads").arg("sites.xlsx");

        cmd.assert()
            .failure()
            .stderr(contains("invalid value 'threads'"));
        Ok(())
    }
}
