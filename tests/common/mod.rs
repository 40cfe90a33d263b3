use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a command file with one pool and `rows` valid contributions from
/// randomly chosen contributors.
pub fn generate_contribution_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    let mut rng = rand::thread_rng();

    wtr.write_record([
        "op",
        "caller",
        "pool",
        "request",
        "amount",
        "recipient",
        "description",
    ])?;
    wtr.write_record(["create_pool", "mgr", "", "", "100", "", ""])?;

    for _ in 0..rows {
        let contributor = format!("contributor_{}", rng.gen_range(1..=50u32));
        wtr.write_record(["contribute", &contributor, "0", "", "1000", "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn generate_large_csv(path: &Path, size_mb: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    let mut rng = rand::thread_rng();

    wtr.write_record([
        "op",
        "caller",
        "pool",
        "request",
        "amount",
        "recipient",
        "description",
    ])?;
    wtr.write_record(["create_pool", "mgr", "", "", "100", "", ""])?;

    let target_size = (size_mb * 1024 * 1024) as u64;

    // Check size every 5000 rows to avoid syscall overhead
    loop {
        for _ in 0..5000 {
            let contributor = format!("contributor_{}", rng.gen_range(1..=50u32));
            wtr.write_record(["contribute", &contributor, "0", "", "1000", "", ""])?;
        }
        wtr.flush()?; // Flush to ensure file size is updated
        if std::fs::metadata(path)?.len() >= target_size {
            break;
        }
    }
    Ok(())
}
