pub mod add_situations;
pub mod lexical_match;
pub mod recall;
