mod atomic_write;
