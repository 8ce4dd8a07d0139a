pub(crate) mod sportvu;
