// Requirement token marker
pub const NEGATION_MARKER: char = '!';

// Jump reference marker
pub const PATH_SEPARATOR: char = '/';

// Variable substitution markers
pub const VARIABLE_OPEN_MARKER: char = '{';
pub const VARIABLE_CLOSE_MARKER: char = '}';
