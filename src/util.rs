pub(crate) mod init_once;
