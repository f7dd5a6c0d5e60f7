//! Integration tests for bx-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{CustomerRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            wall_time: "08:00:03".into(),
            waiting:   2,
            busy:      1,
            arrived:   4,
            served:    1,
            abandoned: 0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("customers.csv").exists());
        assert!(dir.path().join("run_summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "wall_time", "waiting", "busy", "arrived", "served", "abandoned"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("customers.csv")).unwrap();
        assert_eq!(rdr.headers().unwrap().len(), 8);

        let mut rdr = csv::Reader::from_path(dir.path().join("run_summary.csv")).unwrap();
        assert_eq!(rdr.headers().unwrap().len(), 12);
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "08:00:03");
        assert_eq!(&rows[0][2], "2");
    }

    #[test]
    fn missing_ticks_are_empty_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = CustomerRow {
            customer_id:  5,
            disposition:  "abandoned",
            arrival:      10,
            assignment:   None,
            completion:   None,
            abandoned_at: Some(1_810),
            counter_id:   None,
            wait_ticks:   Some(1_800),
        };
        w.write_customer(&row).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("customers.csv")).unwrap();
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(&rec[1], "abandoned");
        assert_eq!(&rec[3], "");
        assert_eq!(&rec[5], "1810");
        assert_eq!(&rec[6], "");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use bx_core::RunConfig;
    use bx_sim::{ScriptedProcess, SimBuilder};

    use crate::{
        CsvWriter, CustomerRow, OutputError, OutputResult, OutputWriter, RunSummaryRow,
        SimOutputObserver, TickSummaryRow,
    };

    /// Writer whose every call fails with a numbered I/O error.
    #[derive(Default)]
    struct FailingWriter {
        calls: usize,
    }

    impl FailingWriter {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("failure {}", self.calls))))
        }
    }

    impl OutputWriter for FailingWriter {
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.fail()
        }
        fn write_customer(&mut self, _row: &CustomerRow) -> OutputResult<()> {
            self.fail()
        }
        fn write_run_summary(&mut self, _row: &RunSummaryRow) -> OutputResult<()> {
            self.fail()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.fail()
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            counters:                1,
            horizon_ticks:           2_000,
            snapshot_interval_ticks: 500,
            ..RunConfig::default()
        }
    }

    #[test]
    fn full_run_written_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        // Customer 0 is served in 5 ticks, customer 1 is still at the counter
        // when the run ends, customer 2 gives up waiting behind it.
        let process = ScriptedProcess::new(600)
            .arrive_at([0, 10, 11])
            .durations([5, 5_000]);
        let mut sim = SimBuilder::new(config(), process).build().unwrap();

        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config());
        let result = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        assert_eq!(result.metrics.served, 1);
        assert_eq!(result.metrics.abandoned, 1);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let ticks: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(ticks, ["0", "500", "1000", "1500", "1999"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("customers.csv")).unwrap();
        let customers: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(customers.len(), 2);
        assert_eq!(&customers[0][0], "0");
        assert_eq!(&customers[0][1], "served");
        assert_eq!(&customers[0][6], "1");
        assert_eq!(&customers[1][0], "2");
        assert_eq!(&customers[1][1], "abandoned");
        assert_eq!(&customers[1][5], "1811");

        let mut rdr = csv::Reader::from_path(dir.path().join("run_summary.csv")).unwrap();
        let run = rdr.records().next().unwrap().unwrap();
        assert_eq!(&run[5], "5");
        assert_eq!(&run[11], "11000");
    }

    #[test]
    fn first_write_error_is_kept() {
        let process = ScriptedProcess::new(600);
        let mut sim = SimBuilder::new(config(), process).build().unwrap();
        let mut obs = SimOutputObserver::new(FailingWriter::default(), &config());
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().expect("stored error");
        assert!(err.to_string().contains("failure 1"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 0);
        // Every later write was still attempted.
        assert!(obs.into_writer().calls > 1);
    }
}
