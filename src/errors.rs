//! Error types for the experiment tools.

/// Creates the Error, ErrorKind, ResultExt, and Result types
error_chain!{
    errors {
        MalformedLine(line: usize, content: String) {
            description("log line is not a `key: value` pair")
            display("line {}: expected `key: value`, got {:?}", line, content)
        }
        MissingField(field: String, line: usize) {
            description("record is missing a field")
            display("record starting at line {} has no `{}` field", line, field)
        }
        InvalidField(field: String, value: String) {
            description("field value cannot be parsed")
            display("field `{}` has invalid value {:?}", field, value)
        }
        MultiplierNotFound(cmd: String) {
            description("no `-M <multiplier>` flag in command")
            display("no `-M <multiplier>` flag in command {:?}", cmd)
        }
        UnexpectedKey(procs: u32, mode: String) {
            description("record does not belong to the experiment design")
            display("unexpected key ({}, '{}'), not part of the experiment design", procs, mode)
        }
        MisalignedSeries(procs: u32, plain: usize, balanced: usize) {
            description("plain and balanced series differ in length")
            display("{} processes: {} plain times vs {} balanced times", procs, plain, balanced)
        }
        InvalidArgument(reason: String) {
            description("invalid argument")
            display("invalid argument: {}", reason)
        }
        Render(reason: String) {
            description("error in rendering the chart")
            display("failed to render chart: {}", reason)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        Toml(::toml::de::Error);
        Logger(::log::SetLoggerError);
    }
}
