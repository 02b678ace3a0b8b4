/// tonascii : conversion d'images en art ASCII, pilotée par un shell interactif.

pub mod cli;
pub mod shell;
