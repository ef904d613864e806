use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn run_bin(args: &[&str]) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_airtrend"));

    Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command")
}

fn stdout_of(output: &Output, args: &[&str]) -> String {
    let stdout_str =
        String::from_utf8(output.stdout.clone()).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );

    stdout_str
}

fn test_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    test_dir
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("failed to convert path to string")
}

#[test]
fn summary_workflow() {
    let test_dir = test_dir("summary_workflow");

    let data_path = test_dir.join("data.csv");
    let data_contents = String::new()
        + "Years,Fuel Consumption,Enplanements,Revenue Streams\n"
        + "2019,10.0,900.0,240.0\n"
        + "2020,,400.0,120.0\n"
        + "2021,14.0,650.0\n"
        + ",1.0,1.0,1.0\n"
        + "2022,16.0,unknown,220.0\n";
    fs::write(&data_path, data_contents).expect("failed to write data file");

    let args = ["--data-file", path_str(&data_path), "summary"];
    let stdout_str = stdout_of(&run_bin(&args), &args);

    let rows: Vec<Vec<&str>> = stdout_str
        .lines()
        .filter(|line| line.starts_with("20"))
        .map(|line| line.split_whitespace().collect())
        .collect();

    assert_eq!(
        rows,
        vec![
            vec!["2019", "10,000,000,000.00", "900,000,000.00", "$240,000,000,000.00"],
            vec!["2020", "13,000,000,000.00", "400,000,000.00", "$120,000,000,000.00"],
            vec!["2022", "16,000,000,000.00", "650,000,000.00", "$220,000,000,000.00"],
        ]
    );
    assert!(stdout_str.contains("fuel consumption"));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn summary_with_config() {
    let test_dir = test_dir("summary_with_config");

    let data_path = test_dir.join("data.csv");
    fs::write(&data_path, "2019,1.0,2.0,3.0\n2020,,,\n").expect("failed to write data file");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[units]\n"
        + "fuel = 1.0\n"
        + "enplanements = 1.0\n"
        + "revenue = 1.0\n"
        + "\n"
        + "[impute]\n"
        + "strategy = \"strict\"\n";
    fs::write(&config_path, config_contents).expect("failed to write config file");

    let args = [
        "--data-file",
        path_str(&data_path),
        "--config",
        path_str(&config_path),
        "summary",
    ];
    let stdout_str = stdout_of(&run_bin(&args), &args);

    let row = stdout_str
        .lines()
        .find(|line| line.starts_with("2020"))
        .expect("missing 2020 row");
    assert_eq!(
        row.split_whitespace().collect::<Vec<_>>(),
        vec!["2020", "1.00", "2.00", "$3.00"]
    );

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn summary_of_missing_file_is_silent() {
    let test_dir = test_dir("summary_of_missing_file_is_silent");

    let data_path = test_dir.join("absent.csv");
    let args = ["--data-file", path_str(&data_path), "summary"];
    let stdout_str = stdout_of(&run_bin(&args), &args);
    assert!(stdout_str.is_empty());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn regress_workflow() {
    let test_dir = test_dir("regress_workflow");

    let data_path = test_dir.join("data.csv");
    let data_contents = String::new()
        + "Years,Fuel Consumption,Enplanements,Revenue Streams\n"
        + "2004,18.2,703.7,134.7\n"
        + "2005,18.6,738.6,151.5\n"
        + "2006,18.3,744.7,165.5\n"
        + "2007,18.9,769.2,174.7\n"
        + "2008,17.9,741.4,186.1\n";
    fs::write(&data_path, data_contents).expect("failed to write data file");

    let args = ["--data-file", path_str(&data_path), "regress"];
    let stdout_str = stdout_of(&run_bin(&args), &args);

    let fit_lines = stdout_str
        .lines()
        .filter(|line| line.starts_with("The fit for "))
        .count();
    let r2_lines: Vec<f64> = stdout_str
        .lines()
        .filter_map(|line| line.strip_prefix("R² for "))
        .map(|line| {
            let (_, val) = line.rsplit_once(": ").expect("missing value");
            val.parse().expect("failed to parse r squared")
        })
        .collect();

    assert_eq!(fit_lines, 6);
    assert_eq!(r2_lines.len(), 6);
    assert!(r2_lines.iter().all(|&r2| (-1e-9..=1.0 + 1e-9).contains(&r2)));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn regress_fails_on_malformed_file() {
    let test_dir = test_dir("regress_fails_on_malformed_file");

    let data_path = test_dir.join("data.csv");
    let data_contents = String::new()
        + "Years,Fuel Consumption,Enplanements,Revenue Streams\n"
        + "2019,1.0,2.0,3.0\n"
        + "2020,,4.0,5.0\n";
    fs::write(&data_path, data_contents).expect("failed to write data file");

    let output = run_bin(&["--data-file", path_str(&data_path), "regress"]);
    assert!(!output.status.success());

    let missing_path = test_dir.join("absent.csv");
    let output = run_bin(&["--data-file", path_str(&missing_path), "regress"]);
    assert!(!output.status.success());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn plot_workflow() {
    let test_dir = test_dir("plot_workflow");

    let data_path = test_dir.join("data.csv");
    let data_contents = String::new()
        + "Years,Fuel Consumption,Enplanements,Revenue Streams\n"
        + "2017,19.6,849.4,173.6\n"
        + "2018,20.3,889.0,181.7\n"
        + "2019,20.9,925.5,188.8\n"
        + "2020,12.3,388.4,90.1\n"
        + "2021,15.6,674.0,129.8\n";
    fs::write(&data_path, data_contents).expect("failed to write data file");

    let plot_dir = test_dir.join("plots");

    for command in ["summary", "regress"] {
        let args = [
            "--data-file",
            path_str(&data_path),
            "--plot-dir",
            path_str(&plot_dir),
            command,
        ];
        stdout_of(&run_bin(&args), &args);
    }

    let plot_files = [
        "overview.svg",
        "fuel.svg",
        "enplanements.svg",
        "revenue.svg",
        "year-vs-fuel.svg",
        "year-vs-enplanements.svg",
        "year-vs-revenue.svg",
        "enplanements-vs-fuel.svg",
        "enplanements-vs-revenue.svg",
        "fuel-vs-revenue.svg",
    ];
    for name in plot_files {
        let file = plot_dir.join(name);
        let metadata = fs::metadata(&file).unwrap_or_else(|_| panic!("missing {file:?}"));
        assert!(metadata.len() > 0, "{file:?} is empty");

        let contents = fs::read_to_string(&file).expect("failed to read plot file");
        assert!(contents.contains("<svg"), "{file:?} is not an SVG document");
    }

    fs::remove_dir_all(&test_dir).ok();
}
