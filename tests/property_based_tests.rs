mod common;

use batch_copy_agent::batch_processing::naming::output_path_for;
use batch_copy_agent::BatchCopyAgent;
use common::strategies::*;
use common::CopyFixture;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: every output is byte-identical to its input after a successful batch
    #[test]
    fn successful_batches_copy_bytes_exactly(files in batch_strategy()) {
        let fixture = CopyFixture::new();
        let batch: Vec<PathBuf> = files
            .iter()
            .map(|(name, content)| fixture.write_input(name, content))
            .collect();
        let agent = BatchCopyAgent::new(fixture.output_dir()).unwrap();

        let processed = agent.process(batch.clone()).unwrap();

        prop_assert_eq!(processed, batch);
        for (name, content) in &files {
            prop_assert_eq!(&fixture.read_output(name), content);
        }
    }

    /// Property: processing twice leaves the same outputs as processing once
    #[test]
    fn reprocessing_is_idempotent(files in batch_strategy()) {
        let fixture = CopyFixture::new();
        let batch: Vec<PathBuf> = files
            .iter()
            .map(|(name, content)| fixture.write_input(name, content))
            .collect();
        let agent = BatchCopyAgent::new(fixture.output_dir()).unwrap();

        agent.process(batch.clone()).unwrap();
        let once: Vec<Vec<u8>> = files.iter().map(|(name, _)| fixture.read_output(name)).collect();
        agent.process(batch).unwrap();
        let twice: Vec<Vec<u8>> = files.iter().map(|(name, _)| fixture.read_output(name)).collect();

        prop_assert_eq!(once, twice);
        prop_assert_eq!(fixture.output_names().len(), files.len());
    }

    /// Property: the output location depends only on the final path segment
    #[test]
    fn output_name_is_final_segment(prefix in directory_prefix_strategy(), name in file_name_strategy()) {
        let mut entry = PathBuf::from("/");
        for segment in &prefix {
            entry.push(segment);
        }
        entry.push(&name);

        let destination = output_path_for(Path::new("/out"), &entry).unwrap();

        prop_assert_eq!(destination, Path::new("/out").join(&name));
    }

    /// Property: a missing entry stops the batch; nothing after it is written
    #[test]
    fn missing_entry_aborts_remaining(files in batch_strategy(), split in 0usize..8) {
        let fixture = CopyFixture::new();
        let mut batch: Vec<PathBuf> = files
            .iter()
            .map(|(name, content)| fixture.write_input(name, content))
            .collect();
        let position = split % (batch.len() + 1);
        batch.insert(position, fixture.missing_input("never written"));
        let agent = BatchCopyAgent::new(fixture.output_dir()).unwrap();

        prop_assert!(agent.process(batch).is_err());

        for (index, (name, _)) in files.iter().enumerate() {
            prop_assert_eq!(fixture.output_exists(name), index < position);
        }
    }
}
