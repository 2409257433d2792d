// Copyright 2024 WHERE TRUE Technologies.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


mod error;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use arrow::{csv::WriterBuilder, datatypes::Schema, record_batch::RecordBatch};
use clap::{builder::RangedU64ValueParser, Parser};
use domtab_common::DEFAULT_BATCH_SIZE;
use domtab_hmmdomtab::{BatchReader, HMMDomTabConfig, HMMDomTabSchemaBuilder};
use futures::StreamExt;
use object_store::{local::LocalFileSystem, path::Path};
use tokio_util::io::StreamReader;
use tracing_subscriber::EnvFilter;

use crate::error::{DomTabCliError, Result};

#[derive(Debug, Parser, PartialEq)]
#[command(
    name = "domtab",
    version,
    about = "Convert HMMScan --domtblout reports into delimited tables"
)]
struct Args {
    /// The HMMScan --domtblout report to read.
    input: PathBuf,

    #[clap(short, long, help = "Write to this file instead of stdout")]
    output: Option<PathBuf>,

    #[clap(
        short,
        long,
        help = "Single byte field delimiter for the output",
        default_value = "\t",
        value_parser = parse_delimiter
    )]
    delimiter: u8,

    #[clap(long, help = "Do not write a header row")]
    no_header: bool,

    #[clap(
        short,
        long,
        help = "Comma separated columns to write, in order",
        value_delimiter = ','
    )]
    columns: Vec<String>,

    #[clap(
        long,
        help = "The number of rows per batch",
        default_value_t = DEFAULT_BATCH_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    batch_size: usize,

    #[clap(long, help = "Stop after this many records")]
    limit: Option<usize>,
}

fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!("delimiter must be a single byte, got {:?}", value)),
    }
}

/// Maps column names to indices of `schema`. No names means every column.
fn resolve_projection(columns: &[String], schema: &Schema) -> Result<Option<Vec<usize>>> {
    if columns.is_empty() {
        return Ok(None);
    }

    let mut projection = Vec::with_capacity(columns.len());

    for name in columns {
        let idx = schema
            .index_of(name)
            .map_err(|_| DomTabCliError::UnknownColumn(name.clone()))?;

        if projection.contains(&idx) {
            return Err(DomTabCliError::DuplicateColumn(name.clone()));
        }

        projection.push(idx);
    }

    Ok(Some(projection))
}

async fn run(args: Args) -> Result<usize> {
    let file_schema = HMMDomTabSchemaBuilder::default().build();
    let projection = resolve_projection(&args.columns, &file_schema)?;

    let config = HMMDomTabConfig::new(Arc::new(LocalFileSystem::new()), file_schema)
        .with_batch_size(args.batch_size)
        .with_limit_opt(args.limit)
        .with_some_projection(projection)?;
    let config = Arc::new(config);

    let location = Path::from_filesystem_path(&args.input)?;
    tracing::info!(location = %location, "Reading domain table");

    let get_result = config.object_store.get(&location).await?;
    let stream_reader = StreamReader::new(get_result.into_stream());
    let buf_reader = tokio::io::BufReader::new(stream_reader);

    let mut batches = BatchReader::new(buf_reader, config.clone())
        .into_stream()
        .boxed();

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let mut writer = WriterBuilder::new()
        .with_header(!args.no_header)
        .with_delimiter(args.delimiter)
        .build(sink);

    let mut n_rows = 0;
    while let Some(batch) = batches.next().await {
        let batch = batch?;
        n_rows += batch.num_rows();
        writer.write(&batch)?;
    }

    // Still emit the header for a report without hits.
    if n_rows == 0 && !args.no_header {
        writer.write(&RecordBatch::new_empty(config.projected_schema()?))?;
    }

    writer.into_inner().flush()?;

    Ok(n_rows)
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(n_rows) => {
            tracing::info!(rows = n_rows, "Finished writing domain table");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
