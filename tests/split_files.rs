use fastasplit::cli::{run, Args, SplitConfig};
use fastasplit::fasta::{fasta_iter, reader_from_path};
use fastasplit::{split, BatchSize, FastARecord, FastaFileSink, SplitError};
use clap::Parser;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn write_fasta(path: &Path, n: usize)
{
    let mut out = String::new();
    for i in 1..=n
    {
        // 70 residues over two lines
        out.push_str(&format!(">seq{} sample record {}\n", i, i));
        out.push_str(&"ACGT".repeat(10));
        out.push('\n');
        out.push_str(&"TTG".repeat(10));
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

fn read_records(path: &Path) -> Vec<FastARecord>
{
    fasta_iter(reader_from_path(path).unwrap())
        .collect::<std::io::Result<_>>()
        .unwrap()
}

fn config(input: &Path, out_dir: &Path, extra: &[&str]) -> SplitConfig
{
    let mut argv = vec![
        "fastasplit".to_string(),
        input.display().to_string(),
        "--out-dir".to_string(),
        out_dir.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    SplitConfig::try_from(&Args::try_parse_from(argv).unwrap()).unwrap()
}

fn group_files(dir: &Path) -> Vec<PathBuf>
{
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort_by_key(|path| {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let n: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
        n.parse::<usize>().unwrap()
    });
    files
}

#[test]
fn splits_2500_records_into_three_files()
{
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fasta");
    let out = dir.path().join("out");
    write_fasta(&input, 2500);

    let summary = run(&config(&input, &out, &[])).unwrap();
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.records, 2500);

    let files = group_files(&out);
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["group_1.fasta", "group_2.fasta", "group_3.fasta"]);

    let sizes: Vec<usize> = files.iter().map(|p| read_records(p).len()).collect();
    assert_eq!(sizes, vec![1000, 1000, 500]);

    let original = read_records(&input);
    let rejoined: Vec<FastARecord> = files.iter().flat_map(|p| read_records(p)).collect();
    assert_eq!(rejoined.len(), original.len());
    for (a, b) in original.iter().zip(&rejoined)
    {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.seq(), b.seq());
    }
}

#[test]
fn batch_size_option_is_honored()
{
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fasta");
    let out = dir.path().join("out");
    write_fasta(&input, 3);

    let summary = run(&config(&input, &out, &["--batch-size", "2"])).unwrap();
    assert_eq!(summary.batches, 2);
    let first = read_records(&out.join("group_1.fasta"));
    let second = read_records(&out.join("group_2.fasta"));
    assert_eq!(first.iter().map(|r| r.id()).collect::<Vec<_>>(), vec!["seq1", "seq2"]);
    assert_eq!(second.iter().map(|r| r.id()).collect::<Vec<_>>(), vec!["seq3"]);
}

#[test]
fn exact_multiple_and_empty_input()
{
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fasta");

    write_fasta(&input, 1000);
    let out = dir.path().join("exact");
    assert_eq!(run(&config(&input, &out, &[])).unwrap().batches, 1);
    assert_eq!(group_files(&out).len(), 1);

    fs::write(&input, "").unwrap();
    let out = dir.path().join("empty");
    let summary = run(&config(&input, &out, &[])).unwrap();
    assert_eq!(summary.batches, 0);
    assert!(group_files(&out).is_empty());
}

#[test]
fn repartition_of_output_is_identical()
{
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fasta");
    write_fasta(&input, 23);

    let first_out = dir.path().join("first");
    run(&config(&input, &first_out, &["-b", "5"])).unwrap();
    let first: Vec<Vec<FastARecord>> = group_files(&first_out).iter().map(|p| read_records(p)).collect();

    let joined = dir.path().join("joined.fasta");
    let mut out = fs::File::create(&joined).unwrap();
    for path in group_files(&first_out)
    {
        out.write_all(&fs::read(path).unwrap()).unwrap();
    }
    drop(out);

    let second_out = dir.path().join("second");
    run(&config(&joined, &second_out, &["-b", "5"])).unwrap();
    let second: Vec<Vec<FastARecord>> = group_files(&second_out).iter().map(|p| read_records(p)).collect();

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[test]
fn gzip_in_and_out()
{
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("reads.fasta");
    write_fasta(&plain, 7);

    let input = dir.path().join("reads.fasta.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&input).unwrap(), Compression::default());
    encoder.write_all(&fs::read(&plain).unwrap()).unwrap();
    encoder.finish().unwrap();

    let out = dir.path().join("out");
    let summary = run(&config(&input, &out, &["-b", "4", "--compress", "--line-width", "0"])).unwrap();
    assert_eq!(summary.batches, 2);

    let batch = read_records(&out.join("group_2.fasta.gz"));
    assert_eq!(batch.len(), 3);
    assert_eq!(batch[0].name(), "seq5 sample record 5");
    assert_eq!(batch[0].lines().len(), 2);
}

#[test]
fn invalid_batch_size_writes_nothing()
{
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fasta");
    write_fasta(&input, 3);

    for size in ["0", "-5"]
    {
        let args = Args::try_parse_from(["fastasplit", input.to_str().unwrap(), "-b", size]).unwrap();
        assert!(matches!(
            SplitConfig::try_from(&args),
            Err(SplitError::InvalidConfiguration { .. })
        ));
    }
}

#[test]
fn sink_failure_keeps_completed_files()
{
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fasta");
    write_fasta(&input, 5);

    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    // a directory where the second batch file should go
    fs::create_dir(out.join("group_2.fasta")).unwrap();

    let reader = reader_from_path(&input).unwrap();
    let mut sink = FastaFileSink::new(&out);
    let err = split(fasta_iter(reader), BatchSize::new(2).unwrap(), &mut sink).unwrap_err();

    match err
    {
        SplitError::SinkWrite { destination, .. } => assert!(destination.ends_with("group_2.fasta")),
        other => panic!("unexpected error {}", other),
    }
    assert_eq!(read_records(&out.join("group_1.fasta")).len(), 2);
    assert!(!out.join("group_3.fasta").exists());
}
