#[macro_use]
extern crate tracing;

use anyhow::{bail, Context, Result};
use homhash::{
    utils::{init_tracing_subscriber, load_items_from_file, Time},
    Digest, LaneDigest, LtHash, MatrixHash, MuHash, RistrettoMultisetHash, SetHash,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, str::FromStr};
use structopt::StructOpt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Scheme {
    Ecmh,
    Lthash,
    Muhash,
    Matrix,
}

impl FromStr for Scheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "ecmh" => Self::Ecmh,
            "lthash" => Self::Lthash,
            "muhash" => Self::Muhash,
            "matrix" => Self::Matrix,
            _ => bail!("unknown scheme {}, expect ecmh|lthash|muhash|matrix", s),
        })
    }
}

#[derive(StructOpt, Debug)]
struct Opt {
    /// hash scheme: ecmh, lthash, muhash or matrix
    #[structopt(short, long, default_value = "ecmh")]
    scheme: Scheme,

    /// items to insert, one per line
    #[structopt(short, long, parse(from_os_str))]
    input: PathBuf,

    /// items to remove afterwards, one per line
    #[structopt(short, long, parse(from_os_str))]
    remove: Option<PathBuf>,

    /// result path, should be a file
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, derive_more::Display, derive_more::From)]
#[serde(untagged)]
enum SetDigest {
    Fixed(Digest),
    Lanes(LaneDigest),
}

#[derive(Debug, Serialize, Deserialize)]
struct Report {
    scheme: Scheme,
    inserted: usize,
    removed: usize,
    digest: SetDigest,
    time: Time,
}

fn multiset_digest<H>(empty: H, insert: &[String], remove: &[String]) -> Result<SetDigest>
where
    H: SetHash,
    H::Output: Into<SetDigest>,
{
    let acc = empty.insert(insert).remove(remove);
    Ok(acc.digest()?.into())
}

fn compute(scheme: Scheme, insert: &[String], remove: &[String]) -> Result<SetDigest> {
    match scheme {
        Scheme::Ecmh => multiset_digest(RistrettoMultisetHash::new(), insert, remove),
        Scheme::Lthash => multiset_digest(LtHash::new(), insert, remove),
        Scheme::Muhash => multiset_digest(MuHash::new(), insert, remove),
        Scheme::Matrix => {
            if !remove.is_empty() {
                bail!("the matrix hash does not support removal");
            }
            Ok(MatrixHash::new().insert(insert)?.digest().into())
        }
    }
}

fn main() -> Result<()> {
    init_tracing_subscriber("set_digest=info")?;
    let opts = Opt::from_args();

    let insert = load_items_from_file(&opts.input)?;
    let remove = match &opts.remove {
        Some(path) => load_items_from_file(path)?,
        None => Vec::new(),
    };
    info!(
        "hashing {} insertions and {} removals with {:?}",
        insert.len(),
        remove.len(),
        opts.scheme
    );

    let timer = howlong::ProcessCPUTimer::new();
    let digest = compute(opts.scheme, &insert, &remove)?;
    let time = Time::from(timer.elapsed());
    info!("digest: {}", digest);
    info!("time: {:?}", time);

    let report = Report {
        scheme: opts.scheme,
        inserted: insert.len(),
        removed: remove.len(),
        digest,
        time,
    };
    let json = serde_json::to_string_pretty(&report)?;
    match &opts.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?
        }
        None => println!("{}", json),
    }
    Ok(())
}
