//! Command-level tests over files on disk.

use std::fs;
use std::path::Path;

use recode_cli::cli::{MappingsArgs, OutputFormatArg, RunArgs};
use recode_cli::commands::{run_mappings, run_pipeline};
use recode_output::OutputFormat;
use tempfile::tempdir;

fn write_inputs(dir: &Path) {
    fs::write(
        dir.join("people.csv"),
        "name,gender,birth_date,birthday_year,birthday_month,birthday_day,attendant_template\n\
         An,1,32999,1990,5,7,Nurse\n\
         Binh,2,33000,,,,Doctor\n",
    )
    .unwrap();
    fs::write(dir.join("gender.csv"), "value,key\n1,Male\n2,Female\n,Nobody\n").unwrap();
}

fn run_args(dir: &Path) -> RunArgs {
    RunArgs {
        source: dir.join("people.csv"),
        mapping: dir.join("gender.csv"),
        output: None,
        format: None,
        preview: 10,
        dry_run: false,
        config: None,
    }
}

#[test]
fn default_output_is_processed_data_xlsx_beside_source() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let result = run_pipeline(&run_args(dir.path())).unwrap();
    let expected = dir.path().join("processed_data.xlsx");
    assert_eq!(result.output.as_deref(), Some(expected.as_path()));
    assert_eq!(result.format, OutputFormat::Xlsx);
    assert!(expected.exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let args = RunArgs {
        dry_run: true,
        ..run_args(dir.path())
    };
    let result = run_pipeline(&args).unwrap();
    assert!(result.output.is_none());
    assert_eq!(result.table.len(), 2);
    assert!(!dir.path().join("processed_data.xlsx").exists());
}

#[test]
fn json_run_produces_recoded_rows() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let args = RunArgs {
        format: Some(OutputFormatArg::Json),
        ..run_args(dir.path())
    };
    let result = run_pipeline(&args).unwrap();
    let path = dir.path().join("processed_data.json");
    assert_eq!(result.output.as_deref(), Some(path.as_path()));
    assert_eq!(result.report.date_columns, vec!["birth_date".to_string()]);
    assert_eq!(result.report.substitutions, 2);

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    insta::assert_snapshot!(serde_json::to_string_pretty(&written).unwrap(), @r#"
    [
      {
        "name": "An",
        "gender": "Male",
        "birth_date": "07/05/1990",
        "birthday_year": 1990,
        "birthday_month": 5,
        "birthday_day": 7,
        "attendant_template": "Nurse",
        "dob": "1990-05-07",
        "attendant_template_id": "Nurse"
      },
      {
        "name": "Binh",
        "gender": "Female",
        "birth_date": "08/05/1990",
        "birthday_year": null,
        "birthday_month": null,
        "birthday_day": null,
        "attendant_template": "Doctor",
        "dob": "",
        "attendant_template_id": "Doctor"
      }
    ]
    "#);
}

#[test]
fn output_without_known_extension_needs_format() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let args = RunArgs {
        output: Some(dir.path().join("result.out")),
        ..run_args(dir.path())
    };
    let err = run_pipeline(&args).unwrap_err();
    assert!(err.to_string().contains("pass --format"));
}

#[test]
fn missing_source_is_reported_with_path() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let args = RunArgs {
        source: dir.path().join("absent.xlsx"),
        ..run_args(dir.path())
    };
    let err = run_pipeline(&args).unwrap_err();
    assert!(format!("{err:#}").contains("absent.xlsx"));
}

#[test]
fn mappings_command_reports_dropped_rows() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let (set, report) = run_mappings(&MappingsArgs {
        mapping: dir.path().join("gender.csv"),
        config: None,
    })
    .unwrap();
    assert_eq!(set.get("gender").map(|dict| dict.len()), Some(2));
    assert_eq!(report.total_dropped(), 1);
}

#[test]
fn mappings_command_applies_configured_duplicate_policy() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("status.csv"), "value,key
A,Active
A,Archived
").unwrap();
    let config = dir.path().join("recode.toml");
    fs::write(&config, "[mapping]\nduplicates = \"reject\"\n").unwrap();

    let lenient = MappingsArgs {
        mapping: dir.path().join("status.csv"),
        config: None,
    };
    let (set, _) = run_mappings(&lenient).unwrap();
    assert_eq!(set.get("status").and_then(|dict| dict.get("A")), Some("Archived"));

    let strict = MappingsArgs {
        config: Some(config),
        ..lenient
    };
    let err = run_mappings(&strict).unwrap_err();
    assert!(format!("{err:#}").contains("maps 'A' twice"));
}
