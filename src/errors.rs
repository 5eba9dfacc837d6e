//! Error types for timing compilation.

error_chain! {
    errors {
        /// A structurally valid row held a field that is not a number.
        Parse(file: String, row: usize, col: usize) {
            description("malformed numeric field")
            display("malformed numeric field in {} (row {}, column {})", file, row, col)
        }

        /// An average was requested over zero values.
        EmptyInput {
            description("average of an empty sequence is undefined")
        }

        /// No row of a party's table held the column a metric needs.
        EmptyColumn(metric: String, role: String) {
            description("metric column has no values")
            display("no values for metric {} (party {})", metric, role)
        }
    }

    foreign_links {
        Io(::std::io::Error) #[doc = "File I/O failure."];
        Csv(::csv::Error) #[doc = "Report serialization failure."];
    }
}
